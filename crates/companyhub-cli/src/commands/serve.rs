//! Start the CompanyHub server.

use clap::Args;

use companyhub_core::config::DatabaseProvider;
use companyhub_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Serve from the seeded in-memory store instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,

    /// Skip database migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: Option<&str>) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.in_memory {
        config.database.provider = DatabaseProvider::Memory;
    }
    if args.no_migrate {
        config.database.run_migrations = false;
    }

    println!("Starting CompanyHub server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);
    println!("  Database: {:?}", config.database.provider);

    companyhub_api::run_server(config).await
}
