//! Flowgate API Server
//!
//! REST server relaying client questions to a managed conversational flow.

use flowgate_api::{create_router, state::AppState};
use flowgate_core::AppConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flowgate_api=debug,tower_http=debug".into()),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env().unwrap_or_default();
    let addr = format!("{}:{}", config.server.host, config.server.port);

    if config.flow.flow_id.is_none() {
        tracing::warn!("FLOW_ID environment variable not set; ask requests will fail until it is configured");
    }

    // Create application state
    let state = Arc::new(AppState::new(config));

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Flowgate API server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
