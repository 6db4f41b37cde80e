//! CompanyHub CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use companyhub_core::error::{AppError, ErrorKind};

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.message);
            exit_code_for(&e)
        }
    }
}

/// Scripts distinguish bad input and missing records from infrastructure failures.
fn exit_code_for(err: &AppError) -> ExitCode {
    match err.kind {
        ErrorKind::Validation | ErrorKind::Unprocessable | ErrorKind::Conflict => ExitCode::from(2),
        ErrorKind::NotFound => ExitCode::from(3),
        ErrorKind::Configuration => ExitCode::from(4),
        ErrorKind::Database | ErrorKind::ServiceUnavailable => ExitCode::from(5),
        _ => ExitCode::FAILURE,
    }
}
