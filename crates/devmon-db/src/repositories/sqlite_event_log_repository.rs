//! `SQLite` event-log sink.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use devmon_core::{EventLogEntry, EventLogSink, EventType, RepositoryError};

use super::row_mappers::{format_datetime, map_sqlx_error, parse_datetime};

/// Persists event-log entries to the `event_log` table.
pub struct SqliteEventLogRepository {
    pool: SqlitePool,
}

impl SqliteEventLogRepository {
    /// Create a new `SQLite` event-log repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Most recent entries first, optionally restricted to one event type.
    ///
    /// Not served over HTTP; this is the read side for diagnostics and tests.
    pub async fn recent(
        &self,
        event_type: Option<EventType>,
        limit: u32,
    ) -> Result<Vec<EventLogEntry>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT event_type, method, path, status_code, success, elapsed_ms, created_at
            FROM event_log
            WHERE (?1 IS NULL OR event_type = ?1)
            ORDER BY id DESC
            LIMIT ?2
            "#,
        )
        .bind(event_type.map(EventType::as_str))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| {
                let storage = |e: sqlx::Error| RepositoryError::Storage(e.to_string());
                let event_type: String = row.try_get("event_type").map_err(storage)?;
                let status_code: i64 = row.try_get("status_code").map_err(storage)?;
                let elapsed_ms: i64 = row.try_get("elapsed_ms").map_err(storage)?;
                let created_at: String = row.try_get("created_at").map_err(storage)?;

                Ok(EventLogEntry {
                    event_type: event_type.parse().map_err(RepositoryError::Storage)?,
                    method: row.try_get("method").map_err(storage)?,
                    path: row.try_get("path").map_err(storage)?,
                    status_code: u16::try_from(status_code)
                        .map_err(|e| RepositoryError::Storage(e.to_string()))?,
                    success: row.try_get("success").map_err(storage)?,
                    elapsed_ms: u64::try_from(elapsed_ms).unwrap_or_default(),
                    created_at: parse_datetime(&created_at)?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl EventLogSink for SqliteEventLogRepository {
    async fn record(&self, entry: EventLogEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO event_log
                (event_type, method, path, status_code, success, elapsed_ms, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.event_type.as_str())
        .bind(&entry.method)
        .bind(&entry.path)
        .bind(i64::from(entry.status_code))
        .bind(entry.success)
        .bind(i64::try_from(entry.elapsed_ms).unwrap_or(i64::MAX))
        .bind(format_datetime(entry.created_at))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;
    use chrono::Utc;

    fn entry(event_type: EventType, status_code: u16) -> EventLogEntry {
        EventLogEntry {
            event_type,
            method: "POST".to_string(),
            path: "/device/api/monitor/set-config".to_string(),
            status_code,
            success: (200..300).contains(&status_code),
            elapsed_ms: 3,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_record_and_read_back() {
        let repo = SqliteEventLogRepository::new(setup_test_database().await.unwrap());
        let first = entry(EventType::UpdateMachineMonitorConfig, 200);
        let second = entry(EventType::UpdateMachineMonitorConfig, 400);
        repo.record(first.clone()).await.unwrap();
        repo.record(second.clone()).await.unwrap();

        let entries = repo.recent(None, 10).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].status_code, 400);
        assert!(!entries[0].success);
        assert_eq!(entries[1].event_type, EventType::UpdateMachineMonitorConfig);
        assert_eq!(entries[1].created_at, first.created_at);
    }

    #[tokio::test]
    async fn test_recent_filters_by_type() {
        let repo = SqliteEventLogRepository::new(setup_test_database().await.unwrap());
        repo.record(entry(EventType::AddDeviceRecord, 200))
            .await
            .unwrap();
        repo.record(entry(EventType::DeleteDeviceRecord, 200))
            .await
            .unwrap();

        let entries = repo
            .recent(Some(EventType::DeleteDeviceRecord), 10)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event_type, EventType::DeleteDeviceRecord);
    }
}
