//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. All concrete implementations are instantiated here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use devmon_core::paths::database_path;
use devmon_core::{
    DeviceListService, DeviceMonitorService, EventLogSink, MonitorConfigService, Repos,
};
use devmon_db::{DbFactory, setup_database};

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 9870;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// `SQLite` database file.
    pub database_path: PathBuf,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Create config with default paths.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self {
            port: DEFAULT_PORT,
            database_path: database_path()?,
            cors: CorsConfig::default(),
        })
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
///
/// Services are held behind `Arc` so handlers can share them across requests.
pub struct AxumContext {
    /// Monitor configuration service.
    pub monitor: Arc<dyn DeviceMonitorService>,
    /// Registers monitor configurations for newly added devices.
    pub onboarding: Arc<MonitorConfigService>,
    /// Device list service.
    pub devices: Arc<DeviceListService>,
    /// Destination for event-log entries of tagged routes.
    pub event_log: Arc<dyn EventLogSink>,
}

impl AxumContext {
    /// Wire the default services over a set of repositories.
    pub fn from_repos(repos: Repos) -> Self {
        let onboarding = Arc::new(MonitorConfigService::new(repos.device_monitor));
        Self {
            monitor: onboarding.clone(),
            onboarding,
            devices: Arc::new(DeviceListService::new(repos.device_list)),
            event_log: repos.event_log,
        }
    }
}

/// Bootstrap the Axum server with all services.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    tracing::info!(
        target: "devmon.paths",
        database_path = %config.database_path.display(),
        "Axum bootstrap resolved paths"
    );

    let pool = setup_database(&config.database_path).await?;
    let repos = DbFactory::build_repos(pool);

    Ok(AxumContext::from_repos(repos))
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config).await?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("devmon server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_override_fields() {
        let config = ServerConfig {
            port: DEFAULT_PORT,
            database_path: PathBuf::from("devmon.db"),
            cors: CorsConfig::AllowAll,
        }
        .with_port(8080)
        .with_database_path("/tmp/other.db")
        .with_allowed_origins(vec!["http://localhost:3000".to_string()]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, PathBuf::from("/tmp/other.db"));
        assert!(matches!(
            config.cors,
            CorsConfig::AllowOrigins(ref origins) if origins.len() == 1
        ));
    }

    #[tokio::test]
    async fn test_bootstrap_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("devmon.db");
        let config = ServerConfig {
            port: DEFAULT_PORT,
            database_path: db_path.clone(),
            cors: CorsConfig::AllowAll,
        };

        let ctx = bootstrap(&config).await.unwrap();
        assert!(db_path.exists());

        let grid = ctx.devices.list(Default::default()).await.unwrap();
        assert_eq!(grid.total, 0);
    }

    #[tokio::test]
    async fn test_bootstrap_leaves_default_data_root_alone() {
        let default_root = std::env::var_os(devmon_core::paths::DATA_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join("devmon")));
        let existed_before = default_root.as_ref().is_some_and(|root| root.exists());

        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            port: DEFAULT_PORT,
            database_path: dir.path().join("devmon.db"),
            cors: CorsConfig::AllowAll,
        };
        bootstrap(&config).await.unwrap();

        if !existed_before {
            assert!(default_root.is_none_or(|root| !root.exists()));
        }
    }
}
