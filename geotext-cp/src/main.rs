//! geotext-cp (Coordinate Parser) - HTTP service and one-shot CLI
//!
//! Serves `POST /coordinates`, `GET /health` and `GET /info`. With `--parse`
//! it processes a single file (or stdin) and prints the result as JSON instead.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use geotext_common::config::{ConfigOverrides, ServiceConfig};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use geotext_cp::{build_router, input, AppState};

/// Command-line arguments for geotext-cp
#[derive(Parser, Debug)]
#[command(name = "geotext-cp")]
#[command(about = "Coordinate Parser service for free-form text")]
#[command(version)]
struct Args {
    /// Address to bind (overrides GEOTEXT_HOST and config file)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides GEOTEXT_PORT and config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tracing filter directive, e.g. "info" or "geotext_cp=debug"
    #[arg(long)]
    log_level: Option<String>,

    /// Parse a file ("-" for stdin), print the result and exit
    #[arg(long, value_name = "FILE")]
    parse: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let overrides = ConfigOverrides {
        config_path: args.config.clone(),
        host: args.host.clone(),
        port: args.port,
        log_level: args.log_level.clone(),
    };
    let config = ServiceConfig::resolve(&overrides).context("Failed to resolve configuration")?;

    // Logs go to stderr so --parse output stays clean JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting GeoText Coordinate Parser (geotext-cp) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    for warning in &config.warnings {
        warn!("{}", warning);
    }
    match &config.config_file {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file, using defaults"),
    }

    if let Some(path) = args.parse {
        return parse_once(&path);
    }

    let addr = config.socket_addr().context("Invalid listen address")?;
    let app = build_router(AppState::new(config.max_text_bytes));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("geotext-cp listening on http://{}", addr);
    info!("Endpoints: GET / | GET /info | GET /health | POST /coordinates");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Run the parser once over a file or stdin and print pretty JSON
fn parse_once(path: &Path) -> Result<()> {
    let result = input::parse_input(path)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Graceful shutdown signal handler
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
