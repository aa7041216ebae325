//! Ask handler
//!
//! Relays one client question to the managed flow service. The handler is
//! a straight line with six exits: body check, message check, session
//! attribute derivation, router construction, flow invocation, and reply
//! shaping. Which session id a failure echoes depends on where it failed:
//! before the router exists only the request-supplied id is available,
//! afterwards the router's resolved id (possibly newly generated) is used.

use crate::error::AskError;
use crate::middleware::Principal;
use crate::response::envelope;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Response,
    Extension,
};
use flowgate_core::Citation;
use flowgate_router::FlowRouter;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

/// Ask request body
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    /// Existing conversation session id; a new one is generated if absent
    pub session_id: Option<String>,

    /// The user's question
    pub message: Option<String>,

    /// Document-filtering constraints forwarded to the flow
    #[serde(default)]
    #[schema(value_type = Object)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Successful ask response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskReplyBody {
    /// Resolved session id, echo it on the next turn
    pub session_id: String,

    /// The flow's answer
    pub message: String,

    /// Supporting citations, when the flow produced them
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub citations: Option<Vec<Citation>>,
}

/// Relay a question to the configured flow
#[utoipa::path(
    post,
    path = "/api/v1/ask",
    tag = "ask",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Flow answered", body = AskReplyBody),
        (status = 400, description = "Missing body or message"),
        (status = 500, description = "Configuration, service, or reply-shape failure")
    )
)]
pub async fn ask_handler(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    body: Bytes,
) -> Result<Response, AskError> {
    state.increment_requests();

    // Validate the request is not empty
    if body.is_empty() {
        return Err(AskError::NoBody);
    }
    let raw: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| AskError::MalformedBody(format!("Malformed request body: {e}")))?;
    if raw.as_object().map(|o| o.is_empty()).unwrap_or(true) {
        return Err(AskError::NoBody);
    }
    let request: AskRequest = serde_json::from_value(raw)
        .map_err(|e| AskError::MalformedBody(format!("Malformed request body: {e}")))?;

    // Validate a message was passed
    let message = match request.message {
        Some(ref m) if !m.is_empty() => m.clone(),
        _ => return Err(AskError::NoMessage),
    };

    // Session attributes come from the trust context, not the body
    let mut session_attributes = HashMap::new();
    session_attributes.insert("principalId".to_string(), principal.id().to_string());

    tracing::info!(
        "Session id: {}",
        request.session_id.as_deref().unwrap_or("None")
    );
    tracing::info!("Session attributes: {:?}", session_attributes);
    tracing::info!("Message: {}", message);
    tracing::info!("Metadata filter: {:?}", request.metadata);

    let router = FlowRouter::new(
        &state.config.flow,
        state.transport.clone(),
        request.session_id.clone(),
        session_attributes,
        request.metadata,
    )
    .map_err(|e| {
        tracing::error!("Error constructing flow router: {}", e);
        AskError::Router {
            session_id: request.session_id.clone(),
            source: e,
        }
    })?;

    let reply = router.invoke(&message).await.map_err(|e| {
        tracing::error!("Error invoking flow for session {}: {}", router.session_id(), e);
        AskError::Flow {
            session_id: router.session_id().to_string(),
            source: e,
        }
    })?;

    match (reply.message, reply.citations) {
        (Some(message), Some(citations)) => {
            tracing::info!("Returning response to client (message and citations)");
            Ok(envelope(
                StatusCode::OK,
                AskReplyBody {
                    session_id: router.session_id().to_string(),
                    message,
                    citations: Some(citations),
                },
            ))
        }
        (Some(message), None) => {
            tracing::info!("Returning response to client (message only)");
            Ok(envelope(
                StatusCode::OK,
                AskReplyBody {
                    session_id: router.session_id().to_string(),
                    message,
                    citations: None,
                },
            ))
        }
        _ => {
            tracing::info!("Returning response to client (no message or citations)");
            Err(AskError::EmptyReply {
                session_id: router.session_id().to_string(),
            })
        }
    }
}
