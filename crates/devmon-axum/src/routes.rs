//! Route definitions and router construction.
//!
//! Mutating routes carry the event-log middleware, each tagged with its own
//! [`EventType`]. Read routes are left untagged.

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{MethodRouter, get, post};
use devmon_core::EventType;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::event_log::{EventLogContext, record_event};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Wrap a method router so every matched call records an `event_type` entry.
fn logged(
    route: MethodRouter<AppState>,
    state: &AppState,
    event_type: EventType,
) -> MethodRouter<AppState> {
    let ctx = EventLogContext::new(Arc::clone(&state.event_log), event_type);
    route.route_layer(middleware::from_fn_with_state(ctx, record_event))
}

/// Build the `/device/api` routes (without the prefix).
///
/// The returned router still needs `.with_state()` before nesting.
pub(crate) fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // Monitor configuration
        .route("/monitor/get-config", get(handlers::monitor::get_config))
        .route(
            "/monitor/set-config",
            logged(
                post(handlers::monitor::set_config),
                state,
                EventType::UpdateMachineMonitorConfig,
            ),
        )
        // Device list
        .route(
            "/list/add",
            logged(
                post(handlers::device_list::add),
                state,
                EventType::AddDeviceRecord,
            ),
        )
        .route("/list/get", get(handlers::device_list::get))
        .route("/list/query", post(handlers::device_list::query))
        .route(
            "/list/update",
            logged(
                post(handlers::device_list::update),
                state,
                EventType::UpdateDeviceRecord,
            ),
        )
        .route(
            "/list/delete",
            logged(
                post(handlers::device_list::delete),
                state,
                EventType::DeleteDeviceRecord,
            ),
        )
}

/// Create the main Axum router.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest(
            "/device/api",
            api_routes(&state).with_state(state).layer(cors),
        )
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
