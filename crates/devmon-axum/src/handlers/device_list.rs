//! Device list handlers.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use devmon_core::utils::validation::not_null;
use devmon_core::{DataGrid, DeviceListQuery, DeviceListRecord, NewDeviceListRecord};

use crate::dto::{IdBody, IdQuery, UpdateDeviceListRequest};
use crate::error::HttpError;
use crate::state::AppState;

/// Register a device record.
///
/// The first record of a device also onboards it, creating the monitor
/// configuration that `get-config` and `set-config` operate on.
pub async fn add(
    State(state): State<AppState>,
    body: Result<Json<NewDeviceListRecord>, JsonRejection>,
) -> Result<Json<DeviceListRecord>, HttpError> {
    let Json(record) = body?;
    let created = state.devices.register(record).await?;
    state
        .onboarding
        .ensure_registered(created.device_id, None)
        .await?;
    Ok(Json(created))
}

/// Get one live device record.
pub async fn get(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<DeviceListRecord>, HttpError> {
    let Query(query) = query?;
    let id = not_null(query.id, "id")?;
    Ok(Json(state.devices.get(id).await?))
}

/// Page through live device records.
pub async fn query(
    State(state): State<AppState>,
    body: Result<Json<DeviceListQuery>, JsonRejection>,
) -> Result<Json<DataGrid<DeviceListRecord>>, HttpError> {
    let Json(query) = body?;
    Ok(Json(state.devices.list(query).await?))
}

/// Partially update a device record.
pub async fn update(
    State(state): State<AppState>,
    body: Result<Json<UpdateDeviceListRequest>, JsonRejection>,
) -> Result<Json<DeviceListRecord>, HttpError> {
    let Json(req) = body?;
    let id = not_null(req.id, "id")?;
    Ok(Json(state.devices.update(id, req.update).await?))
}

/// Logically delete a device record.
pub async fn delete(
    State(state): State<AppState>,
    body: Result<Json<IdBody>, JsonRejection>,
) -> Result<Json<IdBody>, HttpError> {
    let Json(req) = body?;
    let id = not_null(req.id, "id")?;
    state.devices.remove(id).await?;
    Ok(Json(IdBody { id: Some(id) }))
}
