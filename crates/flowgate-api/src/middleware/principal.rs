//! Authorizer principal passthrough
//!
//! Authentication happens upstream: a gateway in front of this service
//! validates the caller and forwards the principal id in a request header.
//! This middleware only lifts that header into a request extension; a
//! missing or unreadable header yields the sentinel value, never an error.

use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Caller identity forwarded by the upstream authorizer
///
/// Extract in handlers with `Extension<Principal>`.
#[derive(Debug, Clone)]
pub struct Principal(String);

impl Principal {
    /// Sentinel used when the authorizer supplied no principal
    pub const NOT_PASSED: &'static str = "not passed";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl Default for Principal {
    fn default() -> Self {
        Self(Self::NOT_PASSED.to_string())
    }
}

/// Insert the caller principal into request extensions
pub async fn principal_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let principal = request
        .headers()
        .get(state.config.server.principal_header.as_str())
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(Principal::new)
        .unwrap_or_default();

    request.extensions_mut().insert(principal);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sentinel() {
        assert_eq!(Principal::default().id(), "not passed");
    }

    #[test]
    fn test_principal_id() {
        assert_eq!(Principal::new("test-user").id(), "test-user");
    }
}
