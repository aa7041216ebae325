//! Health check handlers

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub total_requests: u64,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_secs(),
        total_requests: state.get_request_count(),
    })
}

/// Readiness response
#[derive(Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessChecks {
    pub flow_configured: bool,
}

/// Readiness probe
///
/// Not ready while the flow target is unconfigured; the ask endpoint
/// still answers in that state (with a per-request 500), this is an
/// operational signal only.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let flow_configured = state.flow_configured();

    let response = ReadinessResponse {
        ready: flow_configured,
        checks: ReadinessChecks { flow_configured },
    };

    let status = if response.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowgate_core::AppConfig;

    #[tokio::test]
    async fn test_health_check() {
        let state = Arc::new(AppState::default());
        let Json(response) = health_check(State(state)).await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.total_requests, 0);
    }

    #[tokio::test]
    async fn test_readiness_tracks_flow_config() {
        let unconfigured = Arc::new(AppState::default());
        let (status, Json(response)) = readiness_check(State(unconfigured)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!response.ready);

        let mut config = AppConfig::default();
        config.flow.flow_id = Some("flow-1".to_string());
        let configured = Arc::new(AppState::new(config));
        let (status, Json(response)) = readiness_check(State(configured)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(response.checks.flow_configured);
    }
}
