//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_device_list_repository;
mod sqlite_device_monitor_repository;
mod sqlite_event_log_repository;

pub use sqlite_device_list_repository::SqliteDeviceListRepository;
pub use sqlite_device_monitor_repository::SqliteDeviceMonitorRepository;
pub use sqlite_event_log_repository::SqliteEventLogRepository;
