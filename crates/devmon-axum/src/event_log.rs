//! Event-log middleware for tagged routes.
//!
//! Layered per route with `from_fn_with_state`, so only the routes that carry
//! an [`EventType`] produce entries.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{OriginalUri, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use devmon_core::{EventLogEntry, EventLogSink, EventType};

/// State handed to [`record_event`]: where to write and what to tag with.
#[derive(Clone)]
pub struct EventLogContext {
    sink: Arc<dyn EventLogSink>,
    event_type: EventType,
}

impl EventLogContext {
    pub fn new(sink: Arc<dyn EventLogSink>, event_type: EventType) -> Self {
        Self { sink, event_type }
    }
}

/// Run the handler, then record one entry for the call.
///
/// The response is returned unchanged whether or not the sink accepts the
/// entry.
pub async fn record_event(
    State(ctx): State<EventLogContext>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    // Nested routers see a stripped URI; log the path the client sent.
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map_or_else(|| request.uri().path().to_string(), |uri| uri.path().to_string());
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let entry = EventLogEntry {
        event_type: ctx.event_type,
        method,
        path,
        status_code: status.as_u16(),
        success: status.is_success(),
        elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        created_at: Utc::now(),
    };

    if let Err(e) = ctx.sink.record(entry).await {
        tracing::warn!(
            target: "devmon.event_log",
            event_type = %ctx.event_type,
            error = %e,
            "failed to record event"
        );
    }

    response
}
