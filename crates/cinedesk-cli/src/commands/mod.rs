//! CLI command definitions and dispatch.

pub mod admin;
pub mod migrate;
pub mod notifications;

use clap::{Parser, Subcommand};

use cinedesk_core::AppResult;
use cinedesk_core::config::AppConfig;
use cinedesk_database::DatabasePool;

use crate::output::OutputFormat;

/// CineDesk back-office administration
#[derive(Debug, Parser)]
#[command(name = "cinedesk-cli", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to load on top of default.toml
    #[arg(short, long, env = "CINEDESK_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Administrator accounts
    Admin(admin::AdminArgs),
    /// Notification maintenance
    Notifications(notifications::NotificationArgs),
}

impl Cli {
    pub async fn execute(&self) -> AppResult<()> {
        let config = AppConfig::load_from(&self.config_dir, &self.env)?;
        let db = DatabasePool::connect(&config.database).await?;

        let result = match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &db).await,
            Commands::Admin(args) => admin::execute(args, &db, self.format).await,
            Commands::Notifications(args) => {
                notifications::execute(args, &config, &db, self.format).await
            }
        };

        db.close().await;
        result
    }
}

/// Prompt for a value through dialoguer unless it was given on the command line.
pub(crate) fn prompt_text(given: Option<&str>, prompt: &str, allow_empty: bool) -> AppResult<String> {
    match given {
        Some(value) => Ok(value.to_string()),
        None => dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()
            .map_err(input_error),
    }
}

/// Prompt for a password twice unless it was given on the command line.
pub(crate) fn prompt_password(given: Option<&str>, prompt: &str) -> AppResult<String> {
    match given {
        Some(value) => Ok(value.to_string()),
        None => dialoguer::Password::new()
            .with_prompt(prompt)
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(input_error),
    }
}

pub(crate) fn input_error(e: dialoguer::Error) -> cinedesk_core::AppError {
    cinedesk_core::AppError::internal(format!("Input error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_redeliver() {
        let cli = Cli::try_parse_from([
            "cinedesk-cli",
            "--env",
            "production",
            "notifications",
            "redeliver",
            "0b6f7c3e-2a44-4c4e-9a39-1f3f0a1d2b7c",
        ])
        .unwrap();
        assert_eq!(cli.env, "production");
        assert_eq!(cli.config_dir, "config");
        assert!(matches!(cli.command, Commands::Notifications(_)));
    }

    #[test]
    fn test_given_values_skip_prompts() {
        assert_eq!(prompt_text(Some("root"), "Username", false).unwrap(), "root");
        assert_eq!(prompt_password(Some("s3cret-pass"), "Password").unwrap(), "s3cret-pass");
    }
}
