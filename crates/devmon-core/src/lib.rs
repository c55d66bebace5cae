#![doc = include_str!("../README.md")]

pub mod domain;
pub mod events;
pub mod paths;
pub mod ports;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use domain::{
    DataGrid, DeletedFlag, DeviceListQuery, DeviceListRecord, DeviceListUpdate, DeviceMonitor,
    DeviceMonitorRequest, DeviceMonitorView, ExecStatus, MAX_PAGE_LIMIT, MonitorConfigUpdate,
    MonitorStatus, NewDeviceListRecord, NewDeviceMonitor, PageRequest, UnknownStatusCode,
};
pub use events::{EventLogEntry, EventType};
pub use paths::{PathError, data_root, database_path};
pub use ports::{
    CoreError, DeviceListRepository, DeviceMonitorRepository, DeviceMonitorService, EventLogSink,
    NoopEventLog, Repos, RepositoryError, TracingEventLog,
};
pub use services::{DeviceListService, MonitorConfigService};
