//! Composition utilities for building repositories with `SQLite` backends.
//!
//! This module is focused purely on construction and should not contain any
//! domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use devmon_core::Repos;

use crate::repositories::{
    SqliteDeviceListRepository, SqliteDeviceMonitorRepository, SqliteEventLogRepository,
};

/// Factory for creating repository instances with `SQLite` backends.
pub struct DbFactory;

impl DbFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for adapters to obtain repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Self::device_list_repository(pool.clone()),
            Self::device_monitor_repository(pool.clone()),
            Self::event_log_repository(pool),
        )
    }

    /// Create a device list repository from a pool.
    pub fn device_list_repository(pool: SqlitePool) -> Arc<SqliteDeviceListRepository> {
        Arc::new(SqliteDeviceListRepository::new(pool))
    }

    /// Create a device monitor repository from a pool.
    pub fn device_monitor_repository(pool: SqlitePool) -> Arc<SqliteDeviceMonitorRepository> {
        Arc::new(SqliteDeviceMonitorRepository::new(pool))
    }

    /// Create an event-log repository from a pool.
    pub fn event_log_repository(pool: SqlitePool) -> Arc<SqliteEventLogRepository> {
        Arc::new(SqliteEventLogRepository::new(pool))
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All repositories over this database.
    pub fn repos(&self) -> Repos {
        DbFactory::build_repos(self.pool.clone())
    }

    pub fn device_list_repository(&self) -> SqliteDeviceListRepository {
        SqliteDeviceListRepository::new(self.pool.clone())
    }

    pub fn device_monitor_repository(&self) -> SqliteDeviceMonitorRepository {
        SqliteDeviceMonitorRepository::new(self.pool.clone())
    }

    pub fn event_log_repository(&self) -> SqliteEventLogRepository {
        SqliteEventLogRepository::new(self.pool.clone())
    }
}
