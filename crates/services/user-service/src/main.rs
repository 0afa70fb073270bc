//! User Service - gRPC server for user registration.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User registration microservice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gRPC server
    Serve {
        #[arg(long, env = "USER_SERVICE_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "USER_SERVICE_PORT", default_value = "50052")]
        port: u16,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match Cli::parse().command {
        Commands::Serve { host, port } => user_service_lib::run_embedded(&host, port).await?,
        Commands::Migrate { action } => user_service_lib::run_migrations(action).await?,
    }

    Ok(())
}
