//! Device monitor configuration types.
//!
//! `DeviceMonitorRequest` is what callers send, `DeviceMonitorView` is what
//! they get back. The access token travels only inward: it is accepted on the
//! request, kept in storage, and never part of the view.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DeletedFlag, PageRequest, UnknownStatusCode};
use crate::ports::CoreError;
use crate::utils::validation::{not_blank, not_null};

/// Monitoring agent status reported for a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorStatus {
    NotInstalled = 1,
    Installing = 2,
    NotRunning = 3,
    Running = 4,
}

impl MonitorStatus {
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotInstalled => "not installed",
            Self::Installing => "installing",
            Self::NotRunning => "not running",
            Self::Running => "running",
        }
    }
}

impl From<MonitorStatus> for i32 {
    fn from(status: MonitorStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i32> for MonitorStatus {
    type Error = UnknownStatusCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::NotInstalled),
            2 => Ok(Self::Installing),
            3 => Ok(Self::NotRunning),
            4 => Ok(Self::Running),
            other => Err(UnknownStatusCode(other)),
        }
    }
}

/// Monitor configuration as returned to callers.
///
/// `status` is carried as the raw integer so values are passed through
/// exactly as the service reported them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceMonitorView {
    pub id: i64,
    pub device_name: Option<String>,
    /// 1 not installed, 2 installing, 3 not running, 4 running.
    pub status: i32,
    pub url: Option<String>,
}

impl DeviceMonitorView {
    /// The status as a known enum value, if it is one.
    pub fn monitor_status(&self) -> Option<MonitorStatus> {
        MonitorStatus::try_from(self.status).ok()
    }
}

/// Body of a set-config call.
///
/// Every field is optional on the wire; [`DeviceMonitorRequest::validate`]
/// decides what is actually required.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceMonitorRequest {
    pub id: Option<i64>,
    pub device_id: Option<i64>,
    pub device_name: Option<String>,
    pub url: Option<String>,
    pub access_token: Option<String>,
    #[serde(flatten)]
    pub page: PageRequest,
}

impl DeviceMonitorRequest {
    /// Check required fields and produce the update handed to the service.
    ///
    /// Checks run in order `id`, `url`, `accessToken`; the first failure is
    /// returned. Values are passed on exactly as received.
    pub fn validate(self) -> Result<MonitorConfigUpdate, CoreError> {
        let id = not_null(self.id, "id")?;
        let url = not_blank(self.url, "url")?;
        let access_token = not_blank(self.access_token, "accessToken")?;

        Ok(MonitorConfigUpdate {
            id,
            device_id: self.device_id,
            device_name: self.device_name,
            url,
            access_token,
        })
    }
}

impl fmt::Debug for DeviceMonitorRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceMonitorRequest")
            .field("id", &self.id)
            .field("device_id", &self.device_id)
            .field("device_name", &self.device_name)
            .field("url", &self.url)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("page", &self.page)
            .finish()
    }
}

/// A validated monitor configuration update.
#[derive(Clone, PartialEq, Eq)]
pub struct MonitorConfigUpdate {
    pub id: i64,
    pub device_id: Option<i64>,
    pub device_name: Option<String>,
    pub url: String,
    pub access_token: String,
}

impl fmt::Debug for MonitorConfigUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorConfigUpdate")
            .field("id", &self.id)
            .field("device_id", &self.device_id)
            .field("device_name", &self.device_name)
            .field("url", &self.url)
            .field("access_token", &"***")
            .finish()
    }
}

/// Stored monitor configuration, one live row per device.
#[derive(Clone, PartialEq)]
pub struct DeviceMonitor {
    pub id: i64,
    pub device_id: i64,
    pub device_name: Option<String>,
    pub status: i32,
    pub url: Option<String>,
    pub access_token: Option<String>,
    pub deleted: DeletedFlag,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl DeviceMonitor {
    pub fn to_view(&self) -> DeviceMonitorView {
        DeviceMonitorView {
            id: self.id,
            device_name: self.device_name.clone(),
            status: self.status,
            url: self.url.clone(),
        }
    }
}

impl fmt::Debug for DeviceMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceMonitor")
            .field("id", &self.id)
            .field("device_id", &self.device_id)
            .field("device_name", &self.device_name)
            .field("status", &self.status)
            .field("url", &self.url)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("deleted", &self.deleted)
            .field("create_time", &self.create_time)
            .field("update_time", &self.update_time)
            .finish()
    }
}

/// A monitor configuration to be registered for a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeviceMonitor {
    pub device_id: i64,
    pub device_name: Option<String>,
}
