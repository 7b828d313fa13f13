mod analysis;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::prompt_builder::PromptBuilder;
use crate::analysis::service::AnalysisService;
use crate::config::Config;
use crate::llm_client::gemini::GeminiProvider;
use crate::llm_client::CompletionClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting careers API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion provider and client
    let provider = GeminiProvider::new(
        &config.gemini_api_base,
        &config.gemini_model,
        config.gemini_api_key.clone(),
    )?;
    info!("Completion provider initialized (model: {})", provider.model());

    let client = CompletionClient::new(
        Arc::new(provider),
        config.completion_timeout,
        config.max_concurrent_completions,
    );
    info!(
        "Completion client: timeout {}s, at most {} concurrent calls",
        config.completion_timeout.as_secs(),
        config.max_concurrent_completions
    );

    let state = AppState {
        analysis: AnalysisService::new(
            client,
            PromptBuilder::new(config.interview_question_count),
        ),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the job-board frontend

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
