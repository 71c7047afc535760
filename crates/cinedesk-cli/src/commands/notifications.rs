//! Notification maintenance commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use cinedesk_core::AppResult;
use cinedesk_core::config::AppConfig;
use cinedesk_core::types::{NotificationId, parse_id};
use cinedesk_database::DatabasePool;
use cinedesk_database::repositories::NotificationRepository;
use cinedesk_service::NotificationService;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct NotificationArgs {
    #[command(subcommand)]
    pub command: NotificationCommand,
}

#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// Re-run the fan-out of a notification and insert missing deliveries
    Redeliver {
        /// Notification id
        id: String,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct RedeliveryRow {
    notification: String,
    recipients: u64,
    inserted: u64,
    batches: u32,
}

pub async fn execute(
    args: &NotificationArgs,
    config: &AppConfig,
    db: &DatabasePool,
    format: OutputFormat,
) -> AppResult<()> {
    let store = Arc::new(NotificationRepository::new(db.pool().clone()));
    let service = NotificationService::new(store, &config.notifications);

    match &args.command {
        NotificationCommand::Redeliver { id } => {
            let id = NotificationId::from_uuid(parse_id("id", id)?);
            let report = service.redeliver(id).await?;
            tracing::info!(notification_id = %id, inserted = report.inserted, "Redelivered from CLI");

            output::print_list(
                &[RedeliveryRow {
                    notification: id.to_string(),
                    recipients: report.recipients,
                    inserted: report.inserted,
                    batches: report.batches,
                }],
                format,
            );
            if report.inserted == 0 {
                output::print_success("All deliveries were already present.");
            } else {
                output::print_success(&format!("Inserted {} missing deliveries.", report.inserted));
            }
        }
    }
    Ok(())
}
