//! Database setup and initialization.
//!
//! This module provides the `setup_database()` function for initializing
//! the `SQLite` database with full schema. Entry points call this with the
//! resolved database path.

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::path::Path;

/// Sets up the `SQLite` database connection and ensures the schema exists.
///
/// This function:
/// 1. Creates the parent directory and database file if missing
/// 2. Creates all tables and indexes
///
/// # Example
///
/// ```rust,no_run
/// use devmon_db::setup_database;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database(Path::new("/var/lib/devmon/devmon.db")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true),
    )
    .await?;

    create_schema(&pool).await?;

    tracing::info!(
        target: "devmon.db",
        path = %db_path.display(),
        "database ready"
    );
    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// Creates a fresh in-memory database with the full production schema. The
/// pool holds a single connection that never expires, since every
/// connection to `sqlite::memory:` would otherwise see its own empty
/// database.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    use sqlx::sqlite::SqlitePoolOptions;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Creates the complete database schema.
///
/// Safe to call multiple times as all operations use IF NOT EXISTS.
pub(crate) async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // deleted: 1 = live, 2 = logically deleted
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS device_list (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            device_id INTEGER NOT NULL,
            exec_status INTEGER NOT NULL DEFAULT 1,
            exit_code INTEGER,
            cpu_range REAL,
            xxx_path TEXT,
            deleted INTEGER NOT NULL DEFAULT 1 CHECK (deleted IN (1, 2)),
            create_time TEXT NOT NULL DEFAULT (datetime('now')),
            update_time TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_device_list_device ON device_list(device_id, deleted)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS device_monitor (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            device_id INTEGER NOT NULL,
            device_name TEXT,
            status INTEGER NOT NULL DEFAULT 1,
            url TEXT,
            access_token TEXT,
            deleted INTEGER NOT NULL DEFAULT 1 CHECK (deleted IN (1, 2)),
            create_time TEXT NOT NULL DEFAULT (datetime('now')),
            update_time TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One live configuration per device; deleted rows do not count
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_device_monitor_device
        ON device_monitor(device_id) WHERE deleted = 1
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_type TEXT NOT NULL,
            method TEXT NOT NULL,
            path TEXT NOT NULL,
            status_code INTEGER NOT NULL,
            success INTEGER NOT NULL,
            elapsed_ms INTEGER NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_event_log_type ON event_log(event_type)")
        .execute(pool)
        .await?;

    Ok(())
}
