//! Administrator account commands.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use cinedesk_auth::{PasswordHasher, PasswordPolicy};
use cinedesk_core::types::PageRequest;
use cinedesk_core::types::pagination::MAX_PAGE_SIZE;
use cinedesk_core::{AppError, AppResult};
use cinedesk_database::DatabasePool;
use cinedesk_database::repositories::UserRepository;
use cinedesk_entity::user::{User, UserFilter, UserRole};
use cinedesk_service::user::{NewUser, UserChanges};
use cinedesk_service::{AdminUserService, RequestContext};

use super::{prompt_password, prompt_text};
use crate::output::{self, OutputFormat};

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create an administrator account
    Create {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List administrator accounts
    List,
    /// Set a new password for an account
    ResetPassword {
        #[arg(short, long)]
        username: String,
        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
}

/// One row of `admin list`.
#[derive(Debug, Serialize, Tabled)]
struct AdminRow {
    id: Uuid,
    username: String,
    email: String,
    active: bool,
    last_login: String,
}

impl From<User> for AdminRow {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email.unwrap_or_else(|| "-".into()),
            active: user.is_active,
            last_login: display_time(user.last_login_at),
        }
    }
}

fn display_time(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".into())
}

pub async fn execute(args: &AdminArgs, db: &DatabasePool, format: OutputFormat) -> AppResult<()> {
    let users = Arc::new(UserRepository::new(db.pool().clone()));
    let service = AdminUserService::new(
        users.clone(),
        Arc::new(PasswordHasher::new()),
        Arc::new(PasswordPolicy::default()),
    );
    let ctx = RequestContext::system("cinedesk-cli");

    match &args.command {
        AdminCommand::Create {
            username,
            email,
            password,
        } => {
            let username = prompt_text(username.as_deref(), "Admin username", false)?;
            let email = prompt_text(
                email.as_deref(),
                "Admin email (optional, press Enter to skip)",
                true,
            )?;
            let password = prompt_password(password.as_deref(), "Admin password")?;

            let user = service
                .create(
                    &ctx,
                    NewUser {
                        display_name: Some(username.clone()),
                        username,
                        email: Some(email).filter(|e| !e.trim().is_empty()),
                        password,
                        avatar_url: None,
                        role: UserRole::Admin,
                    },
                )
                .await?;

            output::print_success(&format!("Admin '{}' created", user.username));
            output::print_kv("id", &user.id.to_string());
        }
        AdminCommand::List => {
            let filter = UserFilter {
                role: Some(UserRole::Admin),
                ..UserFilter::default()
            };
            let page = service
                .list(&filter, &PageRequest::new(1, MAX_PAGE_SIZE))
                .await?;
            let rows: Vec<AdminRow> = page.items.into_iter().map(AdminRow::from).collect();
            output::print_list(&rows, format);
            if page.total_items > rows.len() as u64 {
                println!("Showing {} of {} administrators.", rows.len(), page.total_items);
            }
        }
        AdminCommand::ResetPassword { username, password } => {
            let user = users
                .find_by_username(username.trim())
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))?;
            let password = prompt_password(password.as_deref(), "New password")?;

            service
                .update(
                    &ctx,
                    user.id,
                    UserChanges {
                        password: Some(password),
                        ..UserChanges::default()
                    },
                )
                .await?;

            output::print_success(&format!("Password reset for '{}'", user.username));
        }
    }

    Ok(())
}
