//! Device list service - orchestrates device list record operations.

use std::sync::Arc;

use crate::domain::{
    DataGrid, DeviceListQuery, DeviceListRecord, DeviceListUpdate, ExecStatus,
    NewDeviceListRecord,
};
use crate::ports::{CoreError, DeviceListRepository};
use crate::utils::validation::{positive_id, validate_cpu_range, validate_exec_status};

/// Service for device list operations.
pub struct DeviceListService {
    repo: Arc<dyn DeviceListRepository>,
}

impl DeviceListService {
    pub fn new(repo: Arc<dyn DeviceListRepository>) -> Self {
        Self { repo }
    }

    /// Register a record. Missing `exec_status` means not started.
    pub async fn register(
        &self,
        mut record: NewDeviceListRecord,
    ) -> Result<DeviceListRecord, CoreError> {
        positive_id(Some(record.device_id), "deviceId")?;
        let status = record
            .exec_status
            .map_or(Ok(ExecStatus::NotStarted), validate_exec_status)?;
        record.exec_status = Some(status.code());
        if let Some(cpu) = record.cpu_range {
            validate_cpu_range(cpu)?;
        }

        let created = self.repo.insert(record).await?;
        tracing::info!(
            target: "devmon.device_list",
            id = created.id,
            device_id = created.device_id,
            "device record registered"
        );
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<DeviceListRecord, CoreError> {
        let id = positive_id(Some(id), "id")?;
        Ok(self.repo.get_by_id(id).await?)
    }

    /// List live records, newest first.
    pub async fn list(
        &self,
        mut query: DeviceListQuery,
    ) -> Result<DataGrid<DeviceListRecord>, CoreError> {
        if let Some(code) = query.exec_status {
            validate_exec_status(code)?;
        }
        query.page = query.page.normalized();
        Ok(self.repo.find_page(&query).await?)
    }

    /// Apply a partial update to status, exit code, CPU usage or path.
    pub async fn update(
        &self,
        id: i64,
        update: DeviceListUpdate,
    ) -> Result<DeviceListRecord, CoreError> {
        let id = positive_id(Some(id), "id")?;
        if update.is_empty() {
            return Err(CoreError::Validation("no fields to update".to_string()));
        }
        if let Some(code) = update.exec_status {
            validate_exec_status(code)?;
        }
        if let Some(cpu) = update.cpu_range {
            validate_cpu_range(cpu)?;
        }

        let updated = self.repo.update(id, &update).await?;
        tracing::debug!(
            target: "devmon.device_list",
            id,
            exec_status = updated.exec_status,
            exit_code = ?updated.exit_code,
            "device record updated"
        );
        Ok(updated)
    }

    /// Logically delete a record.
    pub async fn remove(&self, id: i64) -> Result<(), CoreError> {
        let id = positive_id(Some(id), "id")?;
        self.repo.soft_delete(id).await?;
        tracing::info!(target: "devmon.device_list", id, "device record deleted");
        Ok(())
    }
}
