//! Flowgate Router - the flow client
//!
//! A `FlowRouter` owns the conversation identity for one request: the
//! session id (client-supplied or freshly generated), the session
//! attributes derived from the trust context, and the caller's metadata
//! filter. `invoke` performs exactly one call to the managed flow service
//! through the configured transport and reshapes the reply.

use flowgate_core::{
    FlowConfig, FlowError, FlowInput, FlowInputContent, FlowReply, FlowTransport,
    InvokeFlowRequest, Result,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub mod transport;

pub use transport::HttpFlowTransport;

/// Per-request client for the managed flow service
pub struct FlowRouter {
    flow_id: String,
    session_id: String,
    session_attributes: HashMap<String, String>,
    metadata: HashMap<String, serde_json::Value>,
    transport: Arc<dyn FlowTransport>,
}

impl FlowRouter {
    /// Create a router for one conversation turn.
    ///
    /// Fails with `FlowError::Config` when no flow identifier is
    /// configured; the check happens here so no call can ever be attempted
    /// against an unconfigured target. A missing `session_id` is replaced
    /// with a freshly generated UUID.
    pub fn new(
        config: &FlowConfig,
        transport: Arc<dyn FlowTransport>,
        session_id: Option<String>,
        session_attributes: HashMap<String, String>,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Result<Self> {
        let flow_id = config
            .flow_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                FlowError::Config(
                    "Flow id is not set. Set the FLOW_ID environment variable.".to_string(),
                )
            })?;

        let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());

        tracing::info!("Initialized flow router for flow {}", flow_id);

        Ok(Self {
            flow_id,
            session_id,
            session_attributes,
            metadata,
            transport,
        })
    }

    /// The resolved session id, possibly newly generated
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send one message to the flow and reshape its reply.
    ///
    /// Session attributes and metadata are attached only when non-empty:
    /// the service distinguishes an omitted section from an empty object.
    /// Transport failures are logged and propagated unchanged.
    pub async fn invoke(&self, message: &str) -> Result<FlowReply> {
        let content = FlowInputContent {
            message_content: message.to_string(),
            session_id: self.session_id.clone(),
            session_attributes: (!self.session_attributes.is_empty())
                .then(|| self.session_attributes.clone()),
            metadata: (!self.metadata.is_empty()).then(|| self.metadata.clone()),
        };

        let request = InvokeFlowRequest {
            flow_id: self.flow_id.clone(),
            input: FlowInput { content },
        };

        tracing::info!(
            "Sending message to flow {} via {} transport",
            self.flow_id,
            self.transport.name()
        );

        let response = match self.transport.invoke_flow(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Error invoking flow {}: {}", self.flow_id, e);
                return Err(e);
            }
        };

        let content = response.output.content;
        tracing::debug!(
            "Flow reply for session {}: message present: {}, citations present: {}",
            self.session_id,
            content.message_content.is_some(),
            content.citations.is_some()
        );

        Ok(FlowReply {
            message: content.message_content,
            citations: content.citations,
        })
    }
}
