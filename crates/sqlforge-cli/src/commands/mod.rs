//! Shell command grammar and per-panel handlers.

pub mod auth;
pub mod history;
pub mod query;
pub mod schema;

use clap::{Parser, Subcommand};
use colored::Colorize;
use sqlforge_core::SqlForgeError;

use crate::bootstrap::AppContext;

/// One line of shell input.
#[derive(Parser)]
#[command(name = "sqlforge", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand)]
pub enum ShellCommand {
    /// Log in with username and password
    Login,
    /// Register a new account (logs in on success)
    Register,
    /// Recover a forgotten password via security questions
    Recover,
    /// Log out and clear the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Manage table-schema contexts
    Schema {
        #[command(subcommand)]
        action: SchemaAction,
    },
    /// Generate SQL from a natural-language question
    Generate {
        /// Skip the query-intent recognition step
        #[arg(long)]
        no_intent: bool,
    },
    /// Show or manage query history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Exit the shell
    #[command(alias = "quit")]
    Exit,
}

#[derive(Subcommand)]
pub enum SchemaAction {
    /// List registered schema contexts
    List,
    /// Register a new schema context
    Add,
    /// Edit the DDL of an existing schema context
    Edit { table_name: String },
    /// Delete a schema context
    Delete { table_name: String },
    /// Select a schema context to ground generation
    Select { table_name: String },
    /// Show the currently selected schema context
    Show,
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Refetch regardless of the cached view
    Refresh,
    /// Delete all history records
    Clear,
}

/// Routes a panel failure: a 401 funnels into the global logout, every
/// other error is shown inline. Returns true when the session expired.
pub async fn report_panel_error(context: &AppContext, err: &SqlForgeError) -> bool {
    if err.is_auth() {
        if let Err(e) = context.coordinator.handle_auth_expiry().await {
            tracing::warn!("Failed to clear the stored session: {}", e);
        }
        println!("{}", "Session expired. Logging out...".yellow());
        true
    } else {
        println!("{}", format!("Error: {}", err).red());
        false
    }
}
