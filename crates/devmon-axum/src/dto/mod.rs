//! Request/response shapes owned by the HTTP adapter.
//!
//! Domain DTOs live in `devmon-core`; these only cover envelopes that exist
//! because of how the routes are laid out.

use devmon_core::DeviceListUpdate;
use serde::{Deserialize, Serialize};

/// `?id=` query parameter.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<i64>,
}

/// `{"id": n}` body, used by delete and echoed back by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdBody {
    pub id: Option<i64>,
}

/// Body of `/list/update`: the record id plus the fields to change.
#[derive(Debug, Deserialize)]
pub struct UpdateDeviceListRequest {
    pub id: Option<i64>,
    #[serde(flatten)]
    pub update: DeviceListUpdate,
}
