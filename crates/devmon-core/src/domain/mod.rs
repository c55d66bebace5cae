//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, HTTP, etc.).
//!
//! # Structure
//!
//! - `monitor` - Monitor configuration request/response shapes and storage record
//! - `device_list` - Device list records, filters and partial updates
//! - `page` - Pagination parameters and paged results

mod device_list;
mod monitor;
mod page;

use thiserror::Error;

pub use device_list::{
    DeletedFlag, DeviceListQuery, DeviceListRecord, DeviceListUpdate, ExecStatus,
    NewDeviceListRecord,
};
pub use monitor::{
    DeviceMonitor, DeviceMonitorRequest, DeviceMonitorView, MonitorConfigUpdate, MonitorStatus,
    NewDeviceMonitor,
};
pub use page::{DEFAULT_PAGE_LIMIT, DataGrid, MAX_PAGE_LIMIT, PageRequest};

/// An integer code that does not name any known variant of a status enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown status code: {0}")]
pub struct UnknownStatusCode(pub i32);
