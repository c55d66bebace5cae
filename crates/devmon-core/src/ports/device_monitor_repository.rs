//! Monitor configuration repository trait.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{DeviceMonitor, MonitorConfigUpdate, NewDeviceMonitor};

/// Persistence for per-device monitor configuration.
///
/// At most one live configuration exists per device. Deleted rows are never
/// returned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceMonitorRepository: Send + Sync {
    /// Register a configuration with status "not installed".
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the device already has a live configuration
    async fn insert(&self, monitor: NewDeviceMonitor) -> Result<DeviceMonitor, RepositoryError>;

    /// # Errors
    ///
    /// - `NotFound` if no live configuration has this id
    async fn get_by_id(&self, id: i64) -> Result<DeviceMonitor, RepositoryError>;

    /// # Errors
    ///
    /// - `NotFound` if the device has no live configuration
    async fn get_by_device_id(&self, device_id: i64) -> Result<DeviceMonitor, RepositoryError>;

    /// Write url, access token and (when present) device name of
    /// configuration `update.id`. Status is left as is.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no live configuration has this id
    async fn update_endpoint(
        &self,
        update: &MonitorConfigUpdate,
    ) -> Result<DeviceMonitor, RepositoryError>;
}
