//! Monitor configuration handlers.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use devmon_core::utils::validation::positive_id;
use devmon_core::{DeviceMonitorRequest, DeviceMonitorView};
use serde::Deserialize;

use crate::error::HttpError;
use crate::state::AppState;

/// Query string of `get-config`.
#[derive(Debug, Deserialize)]
pub struct GetConfigQuery {
    #[serde(rename = "deviceId")]
    pub device_id: Option<i64>,
}

/// Get the monitor configuration of a device.
pub async fn get_config(
    State(state): State<AppState>,
    query: Result<Query<GetConfigQuery>, QueryRejection>,
) -> Result<Json<DeviceMonitorView>, HttpError> {
    let Query(query) = query?;
    let device_id = positive_id(query.device_id, "deviceId")?;
    Ok(Json(state.monitor.get_monitor_config(device_id).await?))
}

/// Set the monitoring URL and access token of a configuration.
pub async fn set_config(
    State(state): State<AppState>,
    body: Result<Json<DeviceMonitorRequest>, JsonRejection>,
) -> Result<Json<DeviceMonitorView>, HttpError> {
    let Json(req) = body?;
    let update = req.validate()?;
    Ok(Json(state.monitor.update_monitor_config(update).await?))
}
