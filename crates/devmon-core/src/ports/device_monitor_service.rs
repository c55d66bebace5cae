//! Monitor configuration service port.
//!
//! The HTTP layer only validates input and forwards to this trait. Lookups,
//! existence checks and status reporting belong to the implementation.

use async_trait::async_trait;

use crate::domain::{DeviceMonitorView, MonitorConfigUpdate};
use crate::ports::CoreError;

#[async_trait]
pub trait DeviceMonitorService: Send + Sync {
    /// Current monitor configuration of a device.
    ///
    /// Behaviour for unknown devices is up to the implementation; callers
    /// pass its error through unchanged.
    async fn get_monitor_config(&self, device_id: i64) -> Result<DeviceMonitorView, CoreError>;

    /// Apply a validated update and return the resulting configuration.
    async fn update_monitor_config(
        &self,
        update: MonitorConfigUpdate,
    ) -> Result<DeviceMonitorView, CoreError>;
}
