//! Production timeline HTTP server.
//!
//! Loads configuration, builds the repository, sets up the HTTP router and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # In-memory repository (default)
//! cargo run --bin prod-timeline-server
//!
//! # Repository seeded from a JSON file
//! REPOSITORY_TYPE=seeded SEED_FILE=data/items.json \
//!   cargo run --bin prod-timeline-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `TIMELINE_WEEKS`: Default number of visible weeks (default: 4)
//! - `REPOSITORY_TYPE`: `local` or `seeded` (default: local)
//! - `SEED_FILE`: Seed file for the seeded repository
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use prod_timeline::config::AppConfig;
use prod_timeline::db::RepositoryFactory;
use prod_timeline::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
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

    info!("Starting production timeline server");

    let config = AppConfig::load_or_default()?.apply_env_overrides()?;
    info!(
        "Repository: {}, default window: {} weeks",
        config.repository.repo_type, config.timeline.weeks_to_show
    );

    let repository = RepositoryFactory::create(&config.repository)?;
    info!("Repository initialized successfully");

    let state = AppState::new(repository, config.timeline.clone());
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
