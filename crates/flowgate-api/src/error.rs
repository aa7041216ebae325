//! API error handling
//!
//! Each variant is one terminal exit of the ask state machine. The JSON
//! field names are part of the public contract and intentionally uneven:
//! the no-body reply uses a capital-M `Message` key while every other
//! error path uses lowercase `message`, and the 500 replies echo a
//! `sessionId` (null when the client never supplied one and no router was
//! built). Do not normalize them.

use crate::response::envelope;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use flowgate_core::FlowError;
use serde_json::json;

/// Terminal failures of the ask endpoint
#[derive(Debug)]
pub enum AskError {
    /// Request body was absent or an empty JSON object
    NoBody,
    /// Request body was present but not decodable
    MalformedBody(String),
    /// Request body carried no message
    NoMessage,
    /// Router construction failed; echoes the request-supplied session id
    Router {
        session_id: Option<String>,
        source: FlowError,
    },
    /// Flow invocation failed; echoes the router's resolved session id
    Flow {
        session_id: String,
        source: FlowError,
    },
    /// The flow answered with neither message nor citations
    EmptyReply { session_id: String },
}

impl AskError {
    /// Fixed diagnostic for a usable-but-empty flow reply
    pub const EMPTY_REPLY_MESSAGE: &'static str = "No message or citations found in flow response";
}

impl IntoResponse for AskError {
    fn into_response(self) -> Response {
        match self {
            AskError::NoBody => envelope(
                StatusCode::BAD_REQUEST,
                json!({ "Message": "No body found" }),
            ),
            AskError::MalformedBody(message) => {
                envelope(StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            AskError::NoMessage => envelope(
                StatusCode::BAD_REQUEST,
                json!({ "message": "Message not provided" }),
            ),
            AskError::Router { session_id, source } => envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "sessionId": session_id, "message": source.to_string() }),
            ),
            AskError::Flow { session_id, source } => envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "sessionId": session_id, "message": source.to_string() }),
            ),
            AskError::EmptyReply { session_id } => envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "sessionId": session_id, "message": Self::EMPTY_REPLY_MESSAGE }),
            ),
        }
    }
}
