//! aviary-cs (Catalog Service) - Main entry point
//!
//! HTTP backend for the Aviary bird species catalog. Records bird entries
//! with their image and audio URLs and organizes them into named groups.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aviary_common::config::{database_path, ensure_root_folder, resolve_root_folder};
use aviary_common::db::init::init_database;
use aviary_cs::{build_router, AppState};

/// Command-line arguments for aviary-cs
#[derive(Parser, Debug)]
#[command(name = "aviary-cs")]
#[command(about = "Catalog Service for the Aviary bird database")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5780", env = "AVIARY_CS_PORT")]
    port: u16,

    /// Root folder containing the catalog database
    #[arg(short, long, env = "AVIARY_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aviary_cs=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Aviary Catalog Service (aviary-cs) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Parse command-line arguments
    let args = Args::parse();

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), "AVIARY_ROOT_FOLDER");
    ensure_root_folder(&root_folder)?;

    let db_path = database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path).await?;

    let state = AppState::new(pool);
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("aviary-cs listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
