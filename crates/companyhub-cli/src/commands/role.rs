//! Role listing.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use companyhub_core::error::AppError;

/// Arguments for role commands
#[derive(Debug, Args)]
pub struct RoleArgs {
    /// Role subcommand
    #[command(subcommand)]
    pub command: RoleCommand,
}

/// Role subcommands
#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    /// List the roles users can be given
    List,
}

/// Role display row for table output
#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    /// Role name
    name: String,
    /// Upper-case lookup name
    normalized_name: String,
}

/// Execute role commands
pub async fn execute(
    args: &RoleArgs,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let repositories = super::create_repositories(&config).await?;

    match &args.command {
        RoleCommand::List => {
            let rows: Vec<RoleRow> = repositories
                .user
                .list_roles()
                .await?
                .iter()
                .map(|r| RoleRow {
                    name: r.as_str().to_string(),
                    normalized_name: r.as_str().to_uppercase(),
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    repositories.close().await;
    Ok(())
}
