//! Schedule Desk (dayls-sd) - Main entry point
//!
//! HTTP service behind the Dayls Academy scheduling form: stores day
//! schedules in SQLite, serves performer and class history, and generates
//! performer insights.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dayls_common::config;
use dayls_common::db::init_database;
use dayls_sd::{build_router, AppState};

/// Command-line arguments for dayls-sd
#[derive(Parser, Debug)]
#[command(name = "dayls-sd")]
#[command(about = "Schedule Desk service for Dayls Academy")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5750", env = "DAYLS_SD_PORT")]
    port: u16,

    /// Root data folder (falls back to DAYLS_ROOT_FOLDER, config file, OS default)
    #[arg(short, long)]
    root_folder: Option<String>,

    /// Database file override (defaults to dayls.db under the root folder)
    #[arg(long, env = "DAYLS_DATABASE")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dayls_sd=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting Dayls Schedule Desk v{}", env!("CARGO_PKG_VERSION"));

    let db_path = match args.database {
        Some(path) => path,
        None => {
            let root_folder = config::resolve_root_folder(args.root_folder.as_deref())
                .context("Failed to resolve root folder")?;
            config::ensure_root_folder(&root_folder)
                .context("Failed to create root folder")?;
            info!("Root folder: {}", root_folder.display());
            config::database_path(&root_folder)
        }
    };
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let state = AppState::new(pool);
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("dayls-sd listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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
