//! Default service implementations.
//!
//! Services hold their repositories as trait objects and contain the only
//! domain rules in the crate; adapters call them and map their errors.

mod device_list;
mod monitor_config;

pub use device_list::DeviceListService;
pub use monitor_config::MonitorConfigService;
