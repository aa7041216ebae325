//! HTTP transport for the invoke-flow operation
//!
//! Posts the invoke-flow payload as JSON to the configured flow service
//! endpoint. No retries and no transport-level timeout beyond reqwest's
//! defaults; the surrounding environment owns both.

use async_trait::async_trait;
use flowgate_core::{
    FlowConfig, FlowError, FlowTransport, InvokeFlowRequest, InvokeFlowResponse, Result,
};
use reqwest::Client;

/// HTTP client for the managed flow service
pub struct HttpFlowTransport {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpFlowTransport {
    /// Create a new transport against an endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    /// Create from config
    pub fn from_config(config: &FlowConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Set a bearer token for deployments that require one
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

#[async_trait]
impl FlowTransport for HttpFlowTransport {
    async fn invoke_flow(&self, request: &InvokeFlowRequest) -> Result<InvokeFlowResponse> {
        let mut http_request = self
            .client
            .post(format!("{}/invoke-flow", self.endpoint))
            .json(request);

        if let Some(key) = &self.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| FlowError::Service(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FlowError::Service(format!(
                "Flow service error: {error_text}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| FlowError::Service(format!("Failed to parse response: {e}")))
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        let transport = HttpFlowTransport::new("http://localhost:9440");
        assert_eq!(transport.endpoint, "http://localhost:9440");
        assert!(transport.api_key.is_none());
    }

    #[test]
    fn test_transport_from_config() {
        let config = FlowConfig {
            endpoint: "https://flows.example.com".to_string(),
            flow_id: Some("flow-1".to_string()),
            api_key: Some("secret".to_string()),
        };

        let transport = HttpFlowTransport::from_config(&config);
        assert_eq!(transport.endpoint, "https://flows.example.com");
        assert_eq!(transport.api_key.as_deref(), Some("secret"));
    }
}
