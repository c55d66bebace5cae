//! Event-log types for mutating operations.
//!
//! Routes that change state are tagged with an [`EventType`]; after the
//! handler runs, one [`EventLogEntry`] is handed to an `EventLogSink`.
//!
//! # Wire Format
//!
//! Event types serialize as their SCREAMING_SNAKE_CASE name:
//!
//! ```json
//! { "eventType": "UPDATE_MACHINE_MONITOR_CONFIG", "method": "POST", "statusCode": 200 }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of operation an event-log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Monitor URL/access token of a device changed.
    UpdateMachineMonitorConfig,
    AddDeviceRecord,
    UpdateDeviceRecord,
    DeleteDeviceRecord,
}

impl EventType {
    pub const ALL: [Self; 4] = [
        Self::UpdateMachineMonitorConfig,
        Self::AddDeviceRecord,
        Self::UpdateDeviceRecord,
        Self::DeleteDeviceRecord,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpdateMachineMonitorConfig => "UPDATE_MACHINE_MONITOR_CONFIG",
            Self::AddDeviceRecord => "ADD_DEVICE_RECORD",
            Self::UpdateDeviceRecord => "UPDATE_DEVICE_RECORD",
            Self::DeleteDeviceRecord => "DELETE_DEVICE_RECORD",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown event type: {s}"))
    }
}

/// One audit record for a tagged request.
///
/// Request bodies are deliberately absent: set-config bodies carry access
/// tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogEntry {
    pub event_type: EventType,
    pub method: String,
    pub path: String,
    pub status_code: u16,
    pub success: bool,
    pub elapsed_ms: u64,
    pub created_at: DateTime<Utc>,
}
