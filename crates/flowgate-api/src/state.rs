//! Application state management

use flowgate_core::{AppConfig, FlowTransport};
use flowgate_router::HttpFlowTransport;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration, read once at startup
    pub config: AppConfig,
    /// Transport to the managed flow service
    pub transport: Arc<dyn FlowTransport>,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
}

impl AppState {
    /// Create state with the HTTP transport wired from config
    pub fn new(config: AppConfig) -> Self {
        let transport = Arc::new(HttpFlowTransport::from_config(&config.flow));
        Self::with_transport(config, transport)
    }

    /// Create state with an explicit transport (used by tests)
    pub fn with_transport(config: AppConfig, transport: Arc<dyn FlowTransport>) -> Self {
        Self {
            config,
            transport,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Whether the flow target is configured
    pub fn flow_configured(&self) -> bool {
        self.config
            .flow
            .flow_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
