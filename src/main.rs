mod agent;
mod config;
mod errors;
mod logging;
mod models;
mod routes;
mod service;

use std::sync::Arc;

use tracing::info;

use crate::agent::GeminiAgentService;
use crate::config::{AppConfig, ALLOWED_MODELS};
use crate::routes::app_router;
use crate::service::chat_service::ChatService;
use crate::service::model_selector::ModelSelector;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let _log_guard = logging::init_logging(config.log_dir.as_deref());

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let agent = GeminiAgentService::new(&config.api_key)?;
    let selector = ModelSelector::new(ALLOWED_MODELS, config.default_model.clone());
    info!(
        "Default model: {} | Temp: {}",
        selector.default_model(),
        config.temperature
    );
    let chat_service = ChatService::new(Arc::new(agent), selector, config.temperature);

    let app = app_router(chat_service, &config.static_dir);

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server ready on http://localhost:{}", config.port);

    axum::serve(listener, app).await?;
    Ok(())
}
