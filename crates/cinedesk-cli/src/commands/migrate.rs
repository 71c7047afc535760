//! Database migration commands.

use clap::{Args, Subcommand};

use cinedesk_core::AppResult;
use cinedesk_database::DatabasePool;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Apply all pending migrations
    Run,
}

pub async fn execute(args: &MigrateArgs, db: &DatabasePool) -> AppResult<()> {
    match args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            cinedesk_database::migration::run_migrations(db.pool()).await?;
            output::print_success("All migrations applied.");
        }
    }
    Ok(())
}
