//! Row mapping helpers for `SQLite` queries.

use chrono::{DateTime, NaiveDateTime, Utc};
use devmon_core::{DeletedFlag, DeviceListRecord, DeviceMonitor, RepositoryError};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Shared SELECT column list for `device_list` queries.
pub const DEVICE_LIST_SELECT_COLUMNS: &str =
    "id, device_id, exec_status, exit_code, cpu_range, xxx_path, deleted, create_time, update_time";

/// Shared SELECT column list for `device_monitor` queries.
pub const DEVICE_MONITOR_SELECT_COLUMNS: &str = "id, device_id, device_name, status, url, access_token, deleted, create_time, update_time";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Format a timestamp the way every table stores it.
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp. Accepts values with or without fractional
/// seconds, so `datetime('now')` column defaults parse too.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    NaiveDateTime::parse_from_str(s.trim_end_matches(" UTC"), "%Y-%m-%d %H:%M:%S%.f")
        .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
        .map_err(|e| RepositoryError::Storage(format!("invalid timestamp {s:?}: {e}")))
}

/// Map `SQLx` errors to `RepositoryError`.
pub fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return RepositoryError::AlreadyExists(db_err.message().to_string());
        }
        if db_err.is_check_violation() {
            return RepositoryError::Constraint(db_err.message().to_string());
        }
    }
    RepositoryError::Storage(e.to_string())
}

fn get<'r, T>(row: &'r SqliteRow, column: &str) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column)
        .map_err(|e| RepositoryError::Storage(e.to_string()))
}

fn deleted_flag(row: &SqliteRow) -> Result<DeletedFlag, RepositoryError> {
    let code: i32 = get(row, "deleted")?;
    DeletedFlag::try_from(code).map_err(|e| RepositoryError::Storage(e.to_string()))
}

/// Parse a database row into a `DeviceListRecord`.
pub fn row_to_device_list(row: &SqliteRow) -> Result<DeviceListRecord, RepositoryError> {
    let create_time: String = get(row, "create_time")?;
    let update_time: String = get(row, "update_time")?;

    Ok(DeviceListRecord {
        id: get(row, "id")?,
        device_id: get(row, "device_id")?,
        exec_status: get(row, "exec_status")?,
        exit_code: get(row, "exit_code")?,
        cpu_range: get(row, "cpu_range")?,
        work_path: get(row, "xxx_path")?,
        deleted: deleted_flag(row)?,
        create_time: parse_datetime(&create_time)?,
        update_time: parse_datetime(&update_time)?,
    })
}

/// Parse a database row into a `DeviceMonitor`.
pub fn row_to_device_monitor(row: &SqliteRow) -> Result<DeviceMonitor, RepositoryError> {
    let create_time: String = get(row, "create_time")?;
    let update_time: String = get(row, "update_time")?;

    Ok(DeviceMonitor {
        id: get(row, "id")?,
        device_id: get(row, "device_id")?,
        device_name: get(row, "device_name")?,
        status: get(row, "status")?,
        url: get(row, "url")?,
        access_token: get(row, "access_token")?,
        deleted: deleted_flag(row)?,
        create_time: parse_datetime(&create_time)?,
        update_time: parse_datetime(&update_time)?,
    })
}
