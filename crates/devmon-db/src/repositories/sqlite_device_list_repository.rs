//! `SQLite` implementation of the `DeviceListRepository` trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use devmon_core::{
    DataGrid, DeletedFlag, DeviceListQuery, DeviceListRecord, DeviceListRepository,
    DeviceListUpdate, ExecStatus, NewDeviceListRecord, RepositoryError,
};

use super::row_mappers::{
    DEVICE_LIST_SELECT_COLUMNS, format_datetime, map_sqlx_error, row_to_device_list,
};

/// `SQLite` implementation of the `DeviceListRepository` trait.
///
/// Every statement filters on `deleted = 1`; logically deleted rows stay in
/// the table but are unreachable through this repository.
pub struct SqliteDeviceListRepository {
    pool: SqlitePool,
}

impl SqliteDeviceListRepository {
    /// Create a new `SQLite` device list repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn not_found(id: i64) -> RepositoryError {
    RepositoryError::NotFound(format!("device record {id}"))
}

/// Append the WHERE clause shared by the page and count queries.
fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, query: &DeviceListQuery) {
    qb.push(" WHERE deleted = ")
        .push_bind(DeletedFlag::Active.code());
    if let Some(device_id) = query.device_id {
        qb.push(" AND device_id = ").push_bind(device_id);
    }
    if let Some(exec_status) = query.exec_status {
        qb.push(" AND exec_status = ").push_bind(exec_status);
    }
}

#[async_trait]
impl DeviceListRepository for SqliteDeviceListRepository {
    async fn insert(
        &self,
        record: NewDeviceListRecord,
    ) -> Result<DeviceListRecord, RepositoryError> {
        let now = format_datetime(Utc::now());
        let exec_status = record
            .exec_status
            .unwrap_or(ExecStatus::NotStarted.code());

        let result = sqlx::query(
            r#"
            INSERT INTO device_list
                (device_id, exec_status, exit_code, cpu_range, xxx_path, deleted, create_time, update_time)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.device_id)
        .bind(exec_status)
        .bind(record.exit_code)
        .bind(record.cpu_range)
        .bind(&record.work_path)
        .bind(DeletedFlag::Active.code())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    async fn get_by_id(&self, id: i64) -> Result<DeviceListRecord, RepositoryError> {
        let sql =
            format!("SELECT {DEVICE_LIST_SELECT_COLUMNS} FROM device_list WHERE id = ? AND deleted = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(DeletedFlag::Active.code())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        match row {
            Some(r) => row_to_device_list(&r),
            None => Err(not_found(id)),
        }
    }

    async fn find_page(
        &self,
        query: &DeviceListQuery,
    ) -> Result<DataGrid<DeviceListRecord>, RepositoryError> {
        let page = query.page.normalized();

        let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM device_list");
        push_filters(&mut count_qb, query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {DEVICE_LIST_SELECT_COLUMNS} FROM device_list"
        ));
        push_filters(&mut qb, query);
        qb.push(" ORDER BY id DESC LIMIT ")
            .push_bind(i64::from(page.limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        let records = rows
            .iter()
            .map(row_to_device_list)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DataGrid::new(
            page,
            u64::try_from(total).unwrap_or_default(),
            records,
        ))
    }

    async fn update(
        &self,
        id: i64,
        update: &DeviceListUpdate,
    ) -> Result<DeviceListRecord, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE device_list SET
                exec_status = COALESCE(?, exec_status),
                exit_code = COALESCE(?, exit_code),
                cpu_range = COALESCE(?, cpu_range),
                xxx_path = COALESCE(?, xxx_path),
                update_time = ?
            WHERE id = ? AND deleted = ?
            "#,
        )
        .bind(update.exec_status)
        .bind(update.exit_code)
        .bind(update.cpu_range)
        .bind(&update.work_path)
        .bind(format_datetime(Utc::now()))
        .bind(id)
        .bind(DeletedFlag::Active.code())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        self.get_by_id(id).await
    }

    async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE device_list SET deleted = ?, update_time = ? WHERE id = ? AND deleted = ?",
        )
        .bind(DeletedFlag::Deleted.code())
        .bind(format_datetime(Utc::now()))
        .bind(id)
        .bind(DeletedFlag::Active.code())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
