//! Flowgate Core - shared types, traits, and configuration
//!
//! This crate defines the abstractions used throughout flowgate:
//! - The invoke-flow wire types exchanged with the managed flow service
//! - The reshaped flow reply handed back to the API layer
//! - The error taxonomy (configuration, service, reply shape)
//! - The `FlowTransport` trait implemented by the HTTP transport
//! - Configuration management

pub mod config;

pub use config::{AppConfig, ConfigError, FlowConfig, LoggingConfig, ServerConfig};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for flow operations
///
/// Display output is the bare message: the API layer echoes error text to
/// clients verbatim, so no variant prefix is added here.
#[derive(Error, Debug)]
pub enum FlowError {
    /// The flow target is not configured (missing flow identifier)
    #[error("{0}")]
    Config(String),

    /// The flow service call itself failed
    #[error("{0}")]
    Service(String),

    /// The flow service answered, but the reply carried nothing usable
    #[error("{0}")]
    Shape(String),
}

pub type Result<T> = std::result::Result<T, FlowError>;

// ============================================================================
// Flow Reply
// ============================================================================

/// A citation attached to a flow answer
///
/// Attribution records are caller-defined; `url` and `title` are the common
/// fields, anything else rides along in `extra` so records pass through
/// unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Source URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Source title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Any further attribution fields, forwarded verbatim
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// The reshaped result of one flow invocation
///
/// Both fields are optional: the service may answer with a message, a
/// message plus citations, or nothing usable at all. An empty reply is an
/// error condition for the caller, not for the transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowReply {
    /// Answer text, when the service produced one
    pub message: Option<String>,

    /// Supporting citations, when the service produced them
    pub citations: Option<Vec<Citation>>,
}

impl FlowReply {
    /// True when the service produced neither a message nor citations
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.citations.is_none()
    }
}

// ============================================================================
// Invoke-Flow Wire Types
// ============================================================================

/// Request payload for the single invoke-flow operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeFlowRequest {
    /// Identifier of the flow to invoke
    pub flow_id: String,

    /// Flow input
    pub input: FlowInput,
}

/// Input wrapper of the invoke-flow payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowInput {
    pub content: FlowInputContent,
}

/// Content block of the invoke-flow payload
///
/// `sessionAttributes` and `metadata` are omitted from the wire entirely
/// when absent; the service distinguishes omission from an empty object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowInputContent {
    /// The user message
    pub message_content: String,

    /// Conversation session identifier
    pub session_id: String,

    /// Caller-context key/value pairs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<HashMap<String, String>>,

    /// Document-filtering constraints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

/// Reply payload of the invoke-flow operation
///
/// Every level defaults: a reply missing `output` or `content` decodes to
/// an empty content block rather than failing, mirroring how the service
/// omits what it did not produce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvokeFlowResponse {
    #[serde(default)]
    pub output: FlowOutput,
}

/// Output wrapper of the invoke-flow reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowOutput {
    #[serde(default)]
    pub content: FlowOutputContent,
}

/// Content block of the invoke-flow reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowOutputContent {
    /// Answer text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_content: Option<String>,

    /// Supporting citations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<Citation>>,
}

// ============================================================================
// Traits
// ============================================================================

/// Trait for the invoke-flow transport
///
/// The router performs exactly one call per invocation through this seam;
/// tests substitute a mock where production wires up the HTTP transport.
#[async_trait::async_trait]
pub trait FlowTransport: Send + Sync {
    /// Perform one invoke-flow call
    async fn invoke_flow(&self, request: &InvokeFlowRequest) -> Result<InvokeFlowResponse>;

    /// Transport name for logging
    fn name(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_reply_is_empty() {
        assert!(FlowReply::default().is_empty());

        let with_message = FlowReply {
            message: Some("hello".to_string()),
            citations: None,
        };
        assert!(!with_message.is_empty());

        let citations_only = FlowReply {
            message: None,
            citations: Some(vec![]),
        };
        assert!(!citations_only.is_empty());
    }

    #[test]
    fn test_input_content_omits_empty_sections() {
        let content = FlowInputContent {
            message_content: "Hello, world!".to_string(),
            session_id: "s-1".to_string(),
            session_attributes: None,
            metadata: None,
        };

        let value = serde_json::to_value(&content).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.get("messageContent").unwrap(), "Hello, world!");
        assert_eq!(object.get("sessionId").unwrap(), "s-1");
        assert!(!object.contains_key("sessionAttributes"));
        assert!(!object.contains_key("metadata"));
    }

    #[test]
    fn test_input_content_keeps_populated_sections() {
        let mut attributes = HashMap::new();
        attributes.insert("principalId".to_string(), "user-1".to_string());
        let mut metadata = HashMap::new();
        metadata.insert("filter".to_string(), serde_json::json!("test-filter"));

        let content = FlowInputContent {
            message_content: "Hello".to_string(),
            session_id: "s-1".to_string(),
            session_attributes: Some(attributes),
            metadata: Some(metadata),
        };

        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value["sessionAttributes"]["principalId"], "user-1");
        assert_eq!(value["metadata"]["filter"], "test-filter");
    }

    #[test]
    fn test_response_tolerates_missing_levels() {
        let empty: InvokeFlowResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.output.content.message_content.is_none());
        assert!(empty.output.content.citations.is_none());

        let no_content: InvokeFlowResponse = serde_json::from_str(r#"{"output": {}}"#).unwrap();
        assert!(no_content.output.content.message_content.is_none());
    }

    #[test]
    fn test_citation_preserves_unknown_fields() {
        let raw = serde_json::json!({
            "url": "https://example.com",
            "title": "Example",
            "page": 12
        });

        let citation: Citation = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(citation.url.as_deref(), Some("https://example.com"));
        assert_eq!(citation.extra.get("page"), Some(&serde_json::json!(12)));

        let back = serde_json::to_value(&citation).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_flow_error_display_is_bare_text() {
        let err = FlowError::Config("Flow id is not set".to_string());
        assert_eq!(err.to_string(), "Flow id is not set");

        let err = FlowError::Service("Request failed: timeout".to_string());
        assert_eq!(err.to_string(), "Request failed: timeout");
    }
}
