//! Dine Catalog Server binary

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dine_server::config::ServerConfig;
use dine_server::storage::Database;
use dine_server::{router, AppState};

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Dine Catalog Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = ServerConfig::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, db={}, flags={:?}",
        config.bind_address, config.database_path, config.flag_encoding
    );

    // The catalog is open before the listener exists, so no request can race it
    let db = Database::new(&config.database_path, config.max_connections)
        .await
        .context("Failed to open catalog database")?
        .with_flag_encoding(config.flag_encoding);

    let app = router(AppState::new(db));

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
