//! `SQLite` implementation of the `DeviceMonitorRepository` trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use devmon_core::{
    DeletedFlag, DeviceMonitor, DeviceMonitorRepository, MonitorConfigUpdate, MonitorStatus,
    NewDeviceMonitor, RepositoryError,
};

use super::row_mappers::{
    DEVICE_MONITOR_SELECT_COLUMNS, format_datetime, map_sqlx_error, row_to_device_monitor,
};

/// `SQLite` implementation of the `DeviceMonitorRepository` trait.
pub struct SqliteDeviceMonitorRepository {
    pool: SqlitePool,
}

impl SqliteDeviceMonitorRepository {
    /// Create a new `SQLite` device monitor repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        column: &str,
        value: i64,
    ) -> Result<Option<DeviceMonitor>, RepositoryError> {
        let sql = format!(
            "SELECT {DEVICE_MONITOR_SELECT_COLUMNS} FROM device_monitor WHERE {column} = ? AND deleted = ?"
        );
        let row = sqlx::query(&sql)
            .bind(value)
            .bind(DeletedFlag::Active.code())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_device_monitor).transpose()
    }
}

#[async_trait]
impl DeviceMonitorRepository for SqliteDeviceMonitorRepository {
    async fn insert(&self, monitor: NewDeviceMonitor) -> Result<DeviceMonitor, RepositoryError> {
        let now = format_datetime(Utc::now());
        let result = sqlx::query(
            r#"
            INSERT INTO device_monitor
                (device_id, device_name, status, deleted, create_time, update_time)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(monitor.device_id)
        .bind(&monitor.device_name)
        .bind(MonitorStatus::NotInstalled.code())
        .bind(DeletedFlag::Active.code())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| match map_sqlx_error(e) {
            RepositoryError::AlreadyExists(_) => RepositoryError::AlreadyExists(format!(
                "monitor config for device {}",
                monitor.device_id
            )),
            other => other,
        })?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    async fn get_by_id(&self, id: i64) -> Result<DeviceMonitor, RepositoryError> {
        self.fetch_one_where("id", id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("monitor config {id}")))
    }

    async fn get_by_device_id(&self, device_id: i64) -> Result<DeviceMonitor, RepositoryError> {
        self.fetch_one_where("device_id", device_id)
            .await?
            .ok_or_else(|| {
                RepositoryError::NotFound(format!("monitor config for device {device_id}"))
            })
    }

    async fn update_endpoint(
        &self,
        update: &MonitorConfigUpdate,
    ) -> Result<DeviceMonitor, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE device_monitor SET
                url = ?,
                access_token = ?,
                device_name = COALESCE(?, device_name),
                update_time = ?
            WHERE id = ? AND deleted = ?
            "#,
        )
        .bind(&update.url)
        .bind(&update.access_token)
        .bind(&update.device_name)
        .bind(format_datetime(Utc::now()))
        .bind(update.id)
        .bind(DeletedFlag::Active.code())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "monitor config {}",
                update.id
            )));
        }
        self.get_by_id(update.id).await
    }
}
