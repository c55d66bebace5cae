//! Device list records (`device_list` table).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PageRequest, UnknownStatusCode};

/// Execution status of a device list record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecStatus {
    NotStarted = 1,
    Running = 2,
    Succeeded = 3,
    Failed = 4,
    Terminated = 5,
}

impl ExecStatus {
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl From<ExecStatus> for i32 {
    fn from(status: ExecStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i32> for ExecStatus {
    type Error = UnknownStatusCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::NotStarted),
            2 => Ok(Self::Running),
            3 => Ok(Self::Succeeded),
            4 => Ok(Self::Failed),
            5 => Ok(Self::Terminated),
            other => Err(UnknownStatusCode(other)),
        }
    }
}

/// Logical delete marker stored in the `deleted` column.
///
/// Rows are never physically removed; `Deleted` rows are invisible to
/// every normal query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum DeletedFlag {
    #[default]
    Active = 1,
    Deleted = 2,
}

impl DeletedFlag {
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl From<DeletedFlag> for i32 {
    fn from(flag: DeletedFlag) -> Self {
        flag.code()
    }
}

impl TryFrom<i32> for DeletedFlag {
    type Error = UnknownStatusCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Active),
            2 => Ok(Self::Deleted),
            other => Err(UnknownStatusCode(other)),
        }
    }
}

/// One row of the `device_list` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceListRecord {
    pub id: i64,
    pub device_id: i64,
    /// 1 not started, 2 running, 3 succeeded, 4 failed, 5 terminated.
    pub exec_status: i32,
    pub exit_code: Option<i32>,
    /// CPU usage percentage.
    pub cpu_range: Option<f32>,
    /// Working directory, stored in the `xxx_path` column.
    pub work_path: Option<String>,
    pub deleted: DeletedFlag,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl DeviceListRecord {
    pub fn status(&self) -> Option<ExecStatus> {
        ExecStatus::try_from(self.exec_status).ok()
    }
}

/// A device list record to be inserted. `exec_status` defaults to not started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeviceListRecord {
    pub device_id: i64,
    #[serde(default)]
    pub exec_status: Option<i32>,
    #[serde(default)]
    pub exit_code: Option<i32>,
    #[serde(default)]
    pub cpu_range: Option<f32>,
    #[serde(default)]
    pub work_path: Option<String>,
}

impl NewDeviceListRecord {
    pub const fn new(device_id: i64) -> Self {
        Self {
            device_id,
            exec_status: None,
            exit_code: None,
            cpu_range: None,
            work_path: None,
        }
    }
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceListUpdate {
    pub exec_status: Option<i32>,
    pub exit_code: Option<i32>,
    pub cpu_range: Option<f32>,
    pub work_path: Option<String>,
}

impl DeviceListUpdate {
    pub const fn is_empty(&self) -> bool {
        self.exec_status.is_none()
            && self.exit_code.is_none()
            && self.cpu_range.is_none()
            && self.work_path.is_none()
    }
}

/// Filters for listing device list records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceListQuery {
    #[serde(default)]
    pub device_id: Option<i64>,
    #[serde(default)]
    pub exec_status: Option<i32>,
    #[serde(flatten)]
    pub page: PageRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_status_codes() {
        assert_eq!(ExecStatus::try_from(1), Ok(ExecStatus::NotStarted));
        assert_eq!(ExecStatus::try_from(5), Ok(ExecStatus::Terminated));
        assert!(ExecStatus::try_from(0).is_err());
        assert_eq!(ExecStatus::Failed.code(), 4);
    }

    #[test]
    fn test_deleted_flag_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&DeletedFlag::Deleted).unwrap(), "2");
        let flag: DeletedFlag = serde_json::from_str("1").unwrap();
        assert_eq!(flag, DeletedFlag::Active);
        assert!(serde_json::from_str::<DeletedFlag>("3").is_err());
    }

    #[test]
    fn test_query_deserializes_filters_and_paging() {
        let query: DeviceListQuery =
            serde_json::from_str(r#"{"deviceId": 5, "execStatus": 2, "limit": 25}"#).unwrap();
        assert_eq!(query.device_id, Some(5));
        assert_eq!(query.exec_status, Some(2));
        assert_eq!(query.page, PageRequest::new(1, 25));
    }

    #[test]
    fn test_update_is_empty() {
        assert!(DeviceListUpdate::default().is_empty());
        let update = DeviceListUpdate {
            exit_code: Some(0),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
