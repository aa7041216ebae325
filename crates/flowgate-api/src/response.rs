//! Response envelope helper
//!
//! Every reply this service produces, success or failure, goes out as a
//! status code plus a JSON body built here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Build the status-plus-JSON-body envelope
pub fn envelope<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_envelope_carries_status_and_body() {
        let response = envelope(
            StatusCode::BAD_REQUEST,
            serde_json::json!({"message": "nope"}),
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"message": "nope"}));
    }
}
