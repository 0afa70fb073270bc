//! Gateway configuration.

use std::env;
use std::time::Duration;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// User service gRPC endpoint
    pub user_service_url: String,
    /// gRPC connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// gRPC request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            user_service_url: env::var("USER_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:50052".to_string()),
            connect_timeout_ms: env::var("GRPC_CONNECT_TIMEOUT_MS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(5000),
            request_timeout_ms: env::var("GRPC_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30000),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            user_service_url: "http://localhost:50052".to_string(),
            connect_timeout_ms: 5000,
            request_timeout_ms: 30000,
        }
    }
}
