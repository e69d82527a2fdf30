use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leadfinder_core::{
    load_config, load_config_from_env, validate_config, Config, HttpLeadGateway, LeadGateway,
};
use leadfinder_server::{api::create_router, state::AppState};

/// Default config file, read when present and `LEADFINDER_CONFIG` is unset.
const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Upper bound on the startup health check, independent of the search timeout.
const STARTUP_HEALTH_TIMEOUT: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load()?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!(
        "Discovery service: {}{} (timeout {}s)",
        config.gateway.base_url, config.gateway.endpoint, config.gateway.timeout_secs
    );

    let gateway: Arc<dyn LeadGateway> = Arc::new(
        HttpLeadGateway::new(&config.gateway).context("Failed to create discovery gateway")?,
    );

    // Check the service once; searches still work if it comes up later.
    match tokio::time::timeout(STARTUP_HEALTH_TIMEOUT, gateway.health()).await {
        Ok(Ok(health)) => info!("Discovery service status: {}", health.status),
        Ok(Err(e)) => warn!("Discovery service not reachable yet: {}", e),
        Err(_) => warn!(
            "Discovery service did not answer within {:?}",
            STARTUP_HEALTH_TIMEOUT
        ),
    }

    let state = Arc::new(AppState::new(config.clone(), gateway));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Config from `LEADFINDER_CONFIG` (must exist), else `config.toml` if present,
/// else defaults plus environment.
fn load() -> Result<Config> {
    if let Ok(path) = std::env::var("LEADFINDER_CONFIG") {
        let path = PathBuf::from(path);
        info!("Loading configuration from {:?}", path);
        return load_config(&path)
            .with_context(|| format!("Failed to load config from {:?}", path));
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        info!("Loading configuration from {:?}", default_path);
        load_config(&default_path)
            .with_context(|| format!("Failed to load config from {:?}", default_path))
    } else {
        info!("No config file, using defaults and environment");
        load_config_from_env().context("Failed to load config from environment")
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
