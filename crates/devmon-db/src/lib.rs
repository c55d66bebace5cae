#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// libsqlite3-sys is only here to turn on the bundled build
use libsqlite3_sys as _;

// Re-export factory for convenient access
pub use factory::DbFactory;

// Re-export TestDb for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

// Re-export repository implementations
pub use repositories::{
    SqliteDeviceListRepository, SqliteDeviceMonitorRepository, SqliteEventLogRepository,
};

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
