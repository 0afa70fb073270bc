//! User Service Library
//!
//! This crate provides user registration via gRPC.
//! It can be run as a standalone service or embedded in the combined binary.

pub mod config;
pub mod events;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Subcommand;
use tonic::transport::Server;
use tracing::{info, warn};

use crate::config::UserServiceConfig;
use crate::events::{EntityEvents, LocalEventBus, RedisEventBus};
use crate::grpc::UserGrpcService;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::UserManager;

/// Run the user service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();
    let db = Database::open(&config.database_url).await?;
    db.migrate(action).await?;
    Ok(())
}

/// Schema actions exposed on the command line.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

/// Pick the event transport: Redis when configured, in-process otherwise.
async fn connect_events(
    config: &UserServiceConfig,
) -> Result<Arc<dyn EntityEvents>, Box<dyn std::error::Error>> {
    match &config.redis_url {
        Some(url) => {
            let bus = RedisEventBus::connect(url).await?;
            info!("Entity events published to Redis");
            Ok(Arc::new(bus))
        }
        None => {
            info!("No Redis URL configured; entity events stay in-process");
            Ok(Arc::new(LocalEventBus::new(config.event_channel_capacity)))
        }
    }
}

/// Run the gRPC server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: UserServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.jwt.is_default() {
        warn!("JWT_SECRET not set; using the built-in default");
    }
    if !config.platform.is_configured() {
        info!("Platform agent credentials not configured");
    }

    // Initialize database
    let db = Database::connect(&config.database_url).await?;
    let db_conn = db.get_connection();

    // Create repository, event bus and service
    let user_repo = Arc::new(UserStore::new(db_conn));
    let events = connect_events(&config).await?;
    let user_service = Arc::new(UserManager::new(user_repo, events));

    // Create gRPC service
    let grpc_service = UserGrpcService::new(user_service);

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("User service listening on {}", addr);

    // Run server
    Server::builder()
        .add_service(proto::UserServiceServer::new(grpc_service))
        .serve(addr)
        .await?;

    Ok(())
}
