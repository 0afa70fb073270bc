//! API Gateway Library
//!
//! This crate provides the HTTP REST API that translates requests to gRPC calls.

pub mod clients;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::clients::UserClient;
use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the gateway as an embedded component (for combined binary).
pub async fn run_embedded(
    host: &str,
    port: u16,
    user_port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GatewayConfig::from_env();
    config.user_service_url = format!("http://{}:{}", connect_host(host), user_port);

    serve(host, port, config).await
}

/// A wildcard bind address is not dialable; use loopback instead.
fn connect_host(host: &str) -> &str {
    match host {
        "0.0.0.0" | "::" => "127.0.0.1",
        other => other,
    }
}

/// Run the HTTP server with the given configuration.
pub async fn serve(
    host: &str,
    port: u16,
    config: GatewayConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Create gRPC client
    let user_client = Arc::new(UserClient::connect_lazy(&config)?);

    // Create app state
    let state = AppState::new(user_client);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_host_rewrites_wildcards() {
        assert_eq!(connect_host("0.0.0.0"), "127.0.0.1");
        assert_eq!(connect_host("::"), "127.0.0.1");
        assert_eq!(connect_host("user-service"), "user-service");
    }
}
