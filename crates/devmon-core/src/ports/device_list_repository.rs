//! Device list repository trait.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{
    DataGrid, DeviceListQuery, DeviceListRecord, DeviceListUpdate, NewDeviceListRecord,
};

/// Persistence for the `device_list` table.
///
/// # Design Rules
///
/// - Rows flagged deleted (`deleted = 2`) are excluded from every read and update
/// - `soft_delete` flips the flag; rows are never physically removed
/// - `create_time`/`update_time` are maintained by the implementation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceListRepository: Send + Sync {
    /// Insert a record and return it with its assigned id and timestamps.
    async fn insert(&self, record: NewDeviceListRecord)
    -> Result<DeviceListRecord, RepositoryError>;

    /// # Errors
    ///
    /// - `NotFound` for missing or logically deleted records
    async fn get_by_id(&self, id: i64) -> Result<DeviceListRecord, RepositoryError>;

    /// One page of live records matching the filters, newest first.
    async fn find_page(
        &self,
        query: &DeviceListQuery,
    ) -> Result<DataGrid<DeviceListRecord>, RepositoryError>;

    /// Apply a partial update and bump `update_time`.
    ///
    /// # Errors
    ///
    /// - `NotFound` for missing or logically deleted records
    async fn update(
        &self,
        id: i64,
        update: &DeviceListUpdate,
    ) -> Result<DeviceListRecord, RepositoryError>;

    /// Mark a record deleted.
    ///
    /// # Errors
    ///
    /// - `NotFound` for missing or already deleted records
    async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError>;
}
