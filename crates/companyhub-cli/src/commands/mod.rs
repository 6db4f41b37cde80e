//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod role;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use companyhub_core::config::AppConfig;
use companyhub_core::error::AppError;
use companyhub_database::{DatabasePool, RepositoryManager};

/// CompanyHub: companies and employees REST API
#[derive(Debug, Parser)]
#[command(name = "companyhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file; defaults to `config/default.toml`
    /// overlaid with `config/$COMPANYHUB_ENV.toml`
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the CompanyHub server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Role management
    Role(role::RoleArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config_path = self.config.as_deref();
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config_path).await,
            Commands::Migrate(args) => migrate::execute(args, config_path, self.format).await,
            Commands::User(args) => user::execute(args, config_path, self.format).await,
            Commands::Role(args) => role::execute(args, config_path, self.format).await,
            Commands::Config(args) => config::execute(args, config_path, self.format).await,
        }
    }
}

/// Helper: load configuration from an explicit file or the environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, AppError> {
    match config_path {
        Some(path) => AppConfig::load_file(path),
        None => {
            let env = std::env::var("COMPANYHUB_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Helper: open a PostgreSQL pool, failing for the in-memory provider
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    if config.database.provider == companyhub_core::config::DatabaseProvider::Memory {
        return Err(AppError::configuration(
            "This command needs database.provider = \"postgres\"",
        ));
    }
    DatabasePool::connect(&config.database).await
}

/// Helper: repositories for the configured backend
pub async fn create_repositories(config: &AppConfig) -> Result<RepositoryManager, AppError> {
    RepositoryManager::connect(&config.database).await
}
