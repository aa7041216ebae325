//! API route definitions

use crate::handlers;
use crate::middleware::principal_middleware;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document for the service
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::ask::ask_handler,
        handlers::health::health_check,
        handlers::health::readiness_check,
    ),
    components(schemas(
        handlers::ask::AskRequest,
        handlers::ask::AskReplyBody,
        handlers::health::HealthResponse,
        handlers::health::ReadinessResponse,
        handlers::health::ReadinessChecks,
    )),
    tags(
        (name = "ask", description = "Question relay to the managed flow service"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/ask", post(handlers::ask::ask_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            principal_middleware,
        ));

    let mut app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .nest("/api/v1", api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = cors_layer(&state.config.server) {
        app = app.layer(cors);
    }

    app.with_state(state)
}

/// Build the CORS layer from config; empty origins means any origin
fn cors_layer(config: &flowgate_core::ServerConfig) -> Option<CorsLayer> {
    if !config.cors_enabled {
        return None;
    }

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let layer = if config.cors_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(origins)
    };

    Some(layer)
}
