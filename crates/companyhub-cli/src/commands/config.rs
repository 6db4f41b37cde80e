//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use companyhub_core::config::DatabaseProvider;
use companyhub_core::error::AppError;
use companyhub_database::connection::mask_password;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Validate configuration
    Validate,
    /// Generate a default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Minimum JWT secret length accepted by `config validate`.
const MIN_SECRET_LEN: usize = 32;

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let source = config_path.unwrap_or("config/default.toml");

    match &args.command {
        ConfigCommand::Show => {
            let mut config = super::load_config(config_path)?;
            config.auth.jwt_secret = "****".to_string();
            config.database.url = mask_password(&config.database.url);
            output::print_item(&config, format);
        }
        ConfigCommand::Validate => match super::load_config(config_path) {
            Ok(config) => {
                let mut problems = Vec::new();
                if config.auth.jwt_secret.len() < MIN_SECRET_LEN {
                    problems.push(format!(
                        "auth.jwt_secret should be at least {MIN_SECRET_LEN} characters"
                    ));
                }
                if config.database.provider == DatabaseProvider::Postgres
                    && config.database.url.trim().is_empty()
                {
                    problems.push("database.url is required for postgres".to_string());
                }
                if config.rate_limit.enabled && config.rate_limit.requests == 0 {
                    problems.push("rate_limit.requests must be positive".to_string());
                }

                if !problems.is_empty() {
                    for p in &problems {
                        output::print_error(p);
                    }
                    return Err(AppError::configuration(format!(
                        "Configuration '{}' has {} problem(s)",
                        source,
                        problems.len()
                    )));
                }

                output::print_success(&format!("Configuration '{}' is valid", source));
                output::print_kv(
                    "Server",
                    &format!("{}:{}", config.server.host, config.server.port),
                );
                output::print_kv("Database", &format!("{:?}", config.database.provider));
                output::print_kv("Database URL", &mask_password(&config.database.url));
                output::print_kv(
                    "Rate limit",
                    &format!(
                        "{} per {}s",
                        config.rate_limit.requests, config.rate_limit.period_seconds
                    ),
                );
                output::print_kv(
                    "Response cache TTL",
                    &format!("{}s", config.cache.response_ttl_seconds),
                );
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
        ConfigCommand::Generate { output: out_path } => {
            let default_config = include_str!("../../../../config/default.toml");

            if let Some(parent) = std::path::Path::new(out_path).parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::internal(format!("Failed to create dir: {}", e)))?;
            }

            tokio::fs::write(out_path, default_config)
                .await
                .map_err(|e| AppError::internal(format!("Failed to write config: {}", e)))?;

            output::print_success(&format!("Default config written to '{}'", out_path));
        }
    }

    Ok(())
}
