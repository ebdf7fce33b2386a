mod assist;
mod catalog;
mod config;
mod errors;
mod export;
mod extract;
mod form;
mod llm_client;
mod render;
mod resume;
mod routes;
mod session;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::TemplateRegistry;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::{build_router, with_middleware};
use crate::session::{InFlight, SessionStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Template catalog is compiled in; a bad catalog aborts startup
    let catalog = TemplateRegistry::bundled().context("bundled template catalog is invalid")?;
    info!("Template catalog loaded ({} templates)", catalog.list().len());

    // Session store
    let sessions = SessionStore::open(&config.session_dir, config.session_cache_capacity)
        .await
        .context("failed to open session directory")?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState {
        config: config.clone(),
        catalog: Arc::new(catalog),
        sessions: Arc::new(sessions),
        model: Arc::new(llm),
        in_flight: InFlight::default(),
    };

    // Build router
    let app = with_middleware(build_router(state));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
