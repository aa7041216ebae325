//! Flowgate configuration management
//!
//! Configuration is read once at startup from environment variables with
//! sensible defaults for development. The flow identifier is the one
//! required setting, and its absence is deliberately not a startup error:
//! the router reports it per request as a caught configuration failure.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Flow service configuration
    pub flow: FlowConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server
        if let Ok(host) = std::env::var("API_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("API_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_PORT".to_string(),
                value: port,
            })?;
        }

        // CORS origins from environment variable (comma-separated)
        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            config.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Authorizer principal header
        if let Ok(header) = std::env::var("PRINCIPAL_HEADER") {
            config.server.principal_header = header;
        }

        // Flow service
        if let Ok(endpoint) = std::env::var("FLOW_ENDPOINT") {
            config.flow.endpoint = endpoint;
        }
        if let Ok(id) = std::env::var("FLOW_ID") {
            config.flow.flow_id = Some(id);
        }
        if let Ok(key) = std::env::var("FLOW_API_KEY") {
            config.flow.api_key = Some(key);
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Allowed origins for CORS; empty means any origin
    pub cors_origins: Vec<String>,

    /// Request header carrying the upstream authorizer principal
    pub principal_header: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_enabled: true,
            cors_origins: vec![],
            principal_header: "x-authorizer-principal-id".to_string(),
        }
    }
}

/// Flow service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Base URL of the managed flow service
    pub endpoint: String,

    /// Identifier of the flow to invoke; required for every invocation
    pub flow_id: Option<String>,

    /// Bearer token for the flow service, when the deployment needs one
    pub api_key: Option<String>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9440".to_string(),
            flow_id: None,
            api_key: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
