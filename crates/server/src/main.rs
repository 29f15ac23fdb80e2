use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use emporia_insights::{spawn_refresh, InsightsService, QueryCache};
use emporia_server::api::{router, AppState};
use emporia_server::config::EmporiaConfig;

/// Emporia dashboard HTTP server.
#[derive(Parser, Debug)]
#[command(name = "emporia-server", about = "HTTP server for the Emporia dashboard")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "emporia.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber from RUST_LOG or default to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let config: EmporiaConfig = if Path::new(&cli.config).exists() {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        info!(
            path = %cli.config,
            "config file not found, using defaults"
        );
        toml::from_str("")?
    };

    // Create the store backend.
    let store = emporia_server::store_factory::create_store(&config.store).await?;

    // Build the view service around an explicit query cache.
    let cache = Arc::new(QueryCache::new(Duration::from_secs(config.cache.ttl_seconds)));
    let insights = Arc::new(InsightsService::new(store, cache));

    // Spawn the background view refresh if enabled.
    let refresh_handle = if config.refresh.enabled {
        let period = Duration::from_secs(config.refresh.interval_seconds);
        Some(spawn_refresh(Arc::clone(&insights), period))
    } else {
        None
    };

    let app = router(AppState::new(Arc::clone(&insights)));

    // Resolve the bind address (CLI overrides take precedence).
    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "emporia-server listening");

    // Serve with graceful shutdown on SIGINT / SIGTERM.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop the refresh task (bounded by the shutdown timeout).
    if let Some(handle) = refresh_handle {
        let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
        if tokio::time::timeout(shutdown_timeout, handle.shutdown())
            .await
            .is_err()
        {
            tracing::warn!(
                timeout_secs = config.server.shutdown_timeout_seconds,
                "shutdown timeout exceeded waiting for the refresh task"
            );
        }
    }

    info!("emporia-server shut down");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
