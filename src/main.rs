use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use atelier_api::api::{create_router, AppState};
use atelier_api::config::Config;
use atelier_api::services::providers::ServingClassifier;
use atelier_api::services::studio::DesignStudio;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config before logging so a bad environment fails loudly
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Inference provider is built once and shared across requests
    let classifier = Arc::new(ServingClassifier::new(
        config.classifier_url.clone(),
        config.classifier_api_key.clone(),
        Duration::from_secs(config.inference_timeout_secs),
    )?);

    let studio = Arc::new(DesignStudio::new(Duration::from_millis(
        config.studio_latency_ms,
    )));

    let state = AppState::new(classifier, studio, config.api_token.clone());
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Fashion ML API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
