//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use companyhub_api::AppState;
use companyhub_core::error::AppError;
use companyhub_service::dto::UserForRegistrationDto;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a user; prompts for the password when not given
    Create {
        /// Login name
        user_name: String,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
        /// Given name
        #[arg(long)]
        first_name: Option<String>,
        /// Family name
        #[arg(long)]
        last_name: Option<String>,
        /// Phone number
        #[arg(long)]
        phone_number: Option<String>,
        /// Role to assign; repeat for several
        #[arg(short, long = "role")]
        roles: Vec<String>,
        /// Password (prompted interactively if omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Show a user and their roles
    Show {
        /// Login name
        user_name: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Login name
    user_name: String,
    /// Email
    email: String,
    /// Roles
    roles: String,
    /// Created at
    created_at: String,
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let repositories = super::create_repositories(&config).await?;

    match &args.command {
        UserCommand::Create {
            user_name,
            email,
            first_name,
            last_name,
            phone_number,
            roles,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt(format!("Password for '{user_name}'"))
                    .with_confirmation("Repeat password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
            };

            let state = AppState::new(config, repositories.clone())?;
            let dto = UserForRegistrationDto {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                user_name: Some(user_name.clone()),
                password: Some(password),
                email: email.clone(),
                phone_number: phone_number.clone(),
                roles: roles.clone(),
            };

            match state.auth_service.register_user(dto).await {
                Ok(user) => {
                    output::print_success(&format!("User '{}' created ({})", user.user_name, user.id))
                }
                Err(e) => {
                    if let Some(details) = &e.details {
                        output::print_item(details, format);
                    }
                    return Err(e);
                }
            }
        }
        UserCommand::Show { user_name } => {
            let user = repositories
                .user
                .find_by_user_name(user_name)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{}' not found", user_name)))?;
            let roles = repositories.user.roles_for_user(user.id).await?;

            let row = UserRow {
                id: user.id.to_string(),
                user_name: user.user_name.clone(),
                email: user.email.clone().unwrap_or_default(),
                roles: roles
                    .iter()
                    .map(|r| r.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                created_at: user.created_at.format("%Y-%m-%d %H:%M").to_string(),
            };
            output::print_list(&[row], format);
        }
    }

    repositories.close().await;
    Ok(())
}
