use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use service::roster::RosterStore;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Roster store per config: seeded with the sample students, or empty.
pub fn build_state(cfg: &AppConfig) -> ServerState {
    let store = if cfg.roster.seed { RosterStore::seeded() } else { RosterStore::default() };
    ServerState::new(store)
}

/// Router wired to a fresh roster; used by `run` and by tests.
pub fn build_app(cfg: &AppConfig) -> Router {
    routes::build_router(build_state(cfg), build_cors())
}

fn load_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {raw}: {e}")))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    // roster first, so the gauge is correct before the first scrape
    let state = build_state(&cfg);
    state.publish_size().await;
    let students = state.roster.len().await;
    info!(students, seeded = cfg.roster.seed, "roster initialized");

    // routes, swagger, cors and tracing layers
    let app = routes::build_router(state, build_cors());

    // bind and serve until the runtime is shut down
    let addr = load_bind_addr(&cfg)?;
    info!(%addr, "starting roster server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
