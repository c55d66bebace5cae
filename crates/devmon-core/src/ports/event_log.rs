//! Event-log sink port and lightweight implementations.

use async_trait::async_trait;

use super::RepositoryError;
use crate::events::EventLogEntry;

/// Destination for event-log entries.
#[async_trait]
pub trait EventLogSink: Send + Sync {
    async fn record(&self, entry: EventLogEntry) -> Result<(), RepositoryError>;
}

/// Sink that discards every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventLog;

#[async_trait]
impl EventLogSink for NoopEventLog {
    async fn record(&self, _entry: EventLogEntry) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Sink that emits each entry as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventLog;

#[async_trait]
impl EventLogSink for TracingEventLog {
    async fn record(&self, entry: EventLogEntry) -> Result<(), RepositoryError> {
        tracing::info!(
            target: "devmon.event_log",
            event_type = %entry.event_type,
            method = %entry.method,
            path = %entry.path,
            status = entry.status_code,
            success = entry.success,
            elapsed_ms = entry.elapsed_ms,
            "event recorded"
        );
        Ok(())
    }
}
