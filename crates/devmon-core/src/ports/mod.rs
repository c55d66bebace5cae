//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Repository traits are minimal and CRUD-focused
//! - Every repository read hides logically deleted rows

pub mod device_list_repository;
pub mod device_monitor_repository;
pub mod device_monitor_service;
pub mod event_log;

use std::sync::Arc;
use thiserror::Error;

pub use device_list_repository::DeviceListRepository;
pub use device_monitor_repository::DeviceMonitorRepository;
pub use device_monitor_service::DeviceMonitorService;
pub use event_log::{EventLogSink, NoopEventLog, TracingEventLog};

/// Container for all repository trait objects.
///
/// Lets adapters wire repositories without depending on concrete storage.
#[derive(Clone)]
pub struct Repos {
    /// Device list records.
    pub device_list: Arc<dyn DeviceListRepository>,
    /// Per-device monitor configuration.
    pub device_monitor: Arc<dyn DeviceMonitorRepository>,
    /// Event-log persistence.
    pub event_log: Arc<dyn EventLogSink>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        device_list: Arc<dyn DeviceListRepository>,
        device_monitor: Arc<dyn DeviceMonitorRepository>,
        event_log: Arc<dyn EventLogSink>,
    ) -> Self {
        Self {
            device_list,
            device_monitor,
            event_log,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found (or is logically deleted).
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A constraint was violated (e.g., check constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes, exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Validation error (missing or malformed input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
