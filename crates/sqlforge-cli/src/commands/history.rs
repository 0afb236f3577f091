//! History panel: cached view of past queries, invalidated by the
//! history epoch.

use anyhow::Result;
use colored::Colorize;
use sqlforge_core::history::HistoryRecord;
use sqlforge_core::query::GenerationStatus;

use crate::bootstrap::AppContext;
use crate::commands::{auth, report_panel_error};

/// The history view's local cache.
///
/// A render refetches when the coordinator's epoch moved past the one
/// observed at the last fetch, when the logged-in user changed, or on an
/// explicit refresh; otherwise the cache is shown as-is.
pub struct HistoryPanel {
    cache: Vec<HistoryRecord>,
    fetched_at_epoch: Option<u64>,
    fetched_for: Option<String>,
}

impl HistoryPanel {
    pub fn new() -> Self {
        Self {
            cache: Vec::new(),
            fetched_at_epoch: None,
            fetched_for: None,
        }
    }

    fn reset(&mut self) {
        self.cache.clear();
        self.fetched_at_epoch = None;
        self.fetched_for = None;
    }

    pub async fn show(&mut self, context: &AppContext, force: bool) -> Result<()> {
        let Some(ticket) = context.coordinator.ticket().await else {
            println!("Authentication required. Please log in.");
            self.reset();
            return Ok(());
        };

        let epoch = context.coordinator.history_epoch();
        let stale = force
            || self.fetched_at_epoch != Some(epoch)
            || self.fetched_for.as_deref() != Some(ticket.session.username.as_str());

        if stale {
            println!("Loading history...");
            match context.history_api.list(&ticket.session).await {
                Ok(records) => {
                    // Discard the response if the login changed mid-flight.
                    if context.coordinator.ticket().await.as_ref() != Some(&ticket) {
                        println!("{}", "Result discarded: the session changed.".yellow());
                        self.reset();
                        return Ok(());
                    }
                    self.cache = records;
                    self.fetched_at_epoch = Some(epoch);
                    self.fetched_for = Some(ticket.session.username.clone());
                }
                Err(e) if e.is_auth() => {
                    report_panel_error(context, &e).await;
                    self.reset();
                    return Ok(());
                }
                Err(_) => {
                    println!(
                        "{}",
                        "Could not fetch history. Ensure the backend is running.".yellow()
                    );
                    return Ok(());
                }
            }
        }

        self.render(&ticket.session.username);
        Ok(())
    }

    pub async fn clear(&mut self, context: &AppContext) -> Result<()> {
        let Some(ticket) = context.coordinator.ticket().await else {
            println!("Authentication required. Please log in.");
            return Ok(());
        };

        if !auth::confirm("Are you sure you want to delete all query history?")? {
            return Ok(());
        }

        match context.history_api.clear(&ticket.session).await {
            Ok(true) => {
                self.cache.clear();
                println!("{}", "History cleared successfully.".green());
            }
            Ok(false) => println!("No history to clear."),
            Err(e) if e.is_auth() => {
                report_panel_error(context, &e).await;
                self.reset();
            }
            Err(_) => println!("{}", "Failed to delete history.".red()),
        }
        Ok(())
    }

    fn render(&self, username: &str) {
        println!("{}", format!("Query history for '{}'", username).bold());
        if self.cache.is_empty() {
            println!("No history found for this user.");
            return;
        }
        for record in &self.cache {
            let timestamp = record
                .gmt_create
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());
            let status = match record.status {
                GenerationStatus::Success => record.status.to_string().green(),
                GenerationStatus::Failed => record.status.to_string().red(),
            };
            let output = record
                .generated_sql
                .as_deref()
                .or(record.error_message.as_deref())
                .unwrap_or("-");
            println!("[{}] {} {}", timestamp, status, record.question);
            println!("    {}", output);
        }
    }
}
