//! Scheduling HTTP Server Binary
//!
//! This is the main entry point for the scheduling REST API server. It
//! initializes the repository, sets up the HTTP router, and starts serving
//! requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the local (in-memory) ledger (default)
//! cargo run --bin medsched-server
//!
//! # Seed the stock Monday-Friday week for providers 1 and 2 at startup
//! MEDSCHED_SEED=1,2 cargo run --bin medsched-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 127.0.0.1)
//! - `PORT`: Server port (default: 3000)
//! - `REPOSITORY_TYPE`: Ledger backend, "local" (default)
//! - `MEDSCHED_SEED`: Comma-separated provider ids to seed with the
//!   standard week at startup
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use medsched::db::{self, AvailabilityRepository};
use medsched::http::{create_router, AppState};
use medsched::models::WeekSchedule;

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

    info!("Starting scheduling HTTP server");

    // Initialize global repository once and reuse it across the app
    db::init_repository()?;
    let repository = std::sync::Arc::clone(db::get_repository()?);
    info!("Repository initialized successfully");

    // Optionally seed providers with the stock week for local development
    if let Ok(seed) = env::var("MEDSCHED_SEED") {
        let provider_ids: Vec<i64> = seed
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();

        let template = WeekSchedule::standard_week();
        for id in &provider_ids {
            for (weekday, window) in template.windows() {
                repository.set_window((*id).into(), weekday, *window).await?;
            }
        }
        info!(
            "Seeded the standard week for {} provider(s)",
            provider_ids.len()
        );
    }

    // Create application state
    let state = AppState::new(repository);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
