//! Timetable HTTP Server Binary
//!
//! This is the main entry point for the timetable REST API server.
//! It loads configuration, initializes the repository, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the local (in-memory) repository (default)
//! cargo run --bin timetable-server --features "local-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `GENERATION_TIMEOUT_SECS`: Time budget for one generation run
//! - `SHUFFLE_SEED`: Fixed seed for varied but reproducible timetables
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use timetable_rust::config::AppConfig;
use timetable_rust::db;
use timetable_rust::http::{create_router, AppState};
use timetable_rust::services::RegenerationController;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Timetable HTTP Server");

    let config = AppConfig::load()?;

    // Initialize global repository once and reuse it across the app
    db::init_repository()?;
    let repository = Arc::clone(db::get_repository()?);
    info!("Repository initialized successfully");

    // The controller is the only writer of the persisted timetable
    let controller = Arc::new(RegenerationController::new(
        repository.clone(),
        config.generation.to_generation_config(),
    ));

    // Create application state
    let state = AppState::new(repository, controller);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("API documentation: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
