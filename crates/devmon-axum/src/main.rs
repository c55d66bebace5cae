//! `devmon-server`: serve the device monitor API over HTTP.

use std::path::PathBuf;

use clap::Parser;
use devmon_axum::bootstrap::DEFAULT_PORT;
use devmon_axum::{ServerConfig, start_server};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(name = "devmon-server", version, about = "Device monitor configuration API")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "DEVMON_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// `SQLite` database file (defaults to the data directory).
    #[arg(long, env = "DEVMON_DATABASE_PATH")]
    database: Option<PathBuf>,

    /// Allowed CORS origin; repeat for several. Allows any origin when absent.
    #[arg(long = "allowed-origin")]
    allowed_origins: Vec<String>,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
        .ok();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads env-backed flags
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();

    let mut config = match args.database {
        Some(path) => ServerConfig {
            port: args.port,
            database_path: path,
            cors: Default::default(),
        },
        None => ServerConfig::with_defaults()?.with_port(args.port),
    };
    if !args.allowed_origins.is_empty() {
        config = config.with_allowed_origins(args.allowed_origins);
    }

    start_server(config).await
}
