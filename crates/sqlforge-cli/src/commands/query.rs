//! Generator panel: submit a question, render the normalized result.

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;
use sqlforge_core::query::GenerationResult;

use crate::bootstrap::AppContext;

pub async fn generate(context: &AppContext, use_intent_recognition: bool) -> Result<()> {
    let Some(ticket) = context.coordinator.ticket().await else {
        println!("Authentication required. Please log in.");
        return Ok(());
    };

    let selected = context.coordinator.selected_schema().await;
    match &selected {
        Some(schema) => println!("Using schema context '{}'.", schema.table_name),
        None => println!("No schema selected; generating without table context."),
    }

    let question: String = Input::new()
        .with_prompt("Enter your natural language question")
        .interact_text()?;

    println!("Generating...");
    let outcome = context
        .orchestrator
        .generate(
            Some(&ticket.session),
            &question,
            use_intent_recognition,
            selected.as_ref(),
        )
        .await;

    let applied = context.coordinator.apply_generation(&ticket, &outcome).await?;
    if !applied {
        // The login changed while the request was in flight.
        println!("{}", "Result discarded: the session changed.".yellow());
        return Ok(());
    }

    match &outcome.result {
        GenerationResult::Success { sql } => {
            println!("{}", "Status: SUCCESS".green());
            println!("SQL: {}", sql.bold());
        }
        GenerationResult::Failure { error_message } => {
            println!("{}", "Status: FAILED".red());
            println!("Error: {}", error_message);
        }
    }

    if outcome.session_expired {
        println!("{}", "Session expired. Logging out...".yellow());
    }
    Ok(())
}
