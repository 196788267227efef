use std::sync::Arc;

mod art;
mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod services;
mod store;

use config::Config;
use services::claude::ClaudeClient;
use store::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionStore,
    pub claude: ClaudeClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodcanvas_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env()?);
    let claude = ClaudeClient::from_config(&config)?;

    if config.ai_enabled() {
        tracing::info!(model = %config.claude_model, "Claude scene generation enabled");
    } else {
        tracing::info!("CLAUDE_API_KEY not set, scenes use local templates only");
    }

    let state = AppState {
        config: config.clone(),
        sessions: SessionStore::new(),
        claude,
    };

    let app = routes::router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
