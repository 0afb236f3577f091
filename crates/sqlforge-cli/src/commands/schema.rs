//! Schema panel: CRUD over registered table contexts plus selection.

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;
use sqlforge_core::schema::{SchemaContext, SchemaDraft};
use sqlforge_core::session::Session;

use crate::bootstrap::AppContext;
use crate::commands::{auth, report_panel_error};

async fn require_session(context: &AppContext) -> Option<Session> {
    let session = context.coordinator.session().await;
    if session.is_none() {
        println!("Please log in first.");
    }
    session
}

fn render_list(schemas: &[SchemaContext], selected: Option<&str>) {
    if schemas.is_empty() {
        println!("No schemas defined for your user.");
        return;
    }
    for schema in schemas {
        let marker = if selected == Some(schema.table_name.as_str()) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        println!("{} {}", marker, schema.table_name.bold());
    }
}

pub async fn list(context: &AppContext) -> Result<()> {
    let Some(session) = require_session(context).await else {
        return Ok(());
    };

    // A list failure is non-fatal: banner plus an empty view.
    match context.registry.list(&session).await {
        Ok(schemas) => {
            let selected = context.coordinator.selected_schema().await;
            render_list(&schemas, selected.as_ref().map(|s| s.table_name.as_str()));
        }
        Err(e) if e.is_auth() => {
            report_panel_error(context, &e).await;
        }
        Err(_) => {
            println!(
                "{}",
                "Failed to load schemas. Session may have expired.".yellow()
            );
        }
    }
    Ok(())
}

pub async fn add(context: &AppContext) -> Result<()> {
    let Some(session) = require_session(context).await else {
        return Ok(());
    };

    let table_name: String = Input::new()
        .with_prompt("Table name (e.g. employees)")
        .interact_text()?;
    let ddl_context: String = Input::new()
        .with_prompt("DDL context (e.g. CREATE TABLE employees (id INT, ...))")
        .interact_text()?;
    let draft = SchemaDraft::new(table_name, ddl_context);

    let known = match context.registry.list(&session).await {
        Ok(known) => known,
        Err(e) => {
            report_panel_error(context, &e).await;
            return Ok(());
        }
    };

    match context.registry.create(&session, &known, &draft).await {
        Ok((mutation, refreshed)) => {
            context.coordinator.apply_schema_mutation(&mutation).await;
            println!(
                "{}",
                format!("Added schema for '{}' successfully!", draft.table_name).green()
            );
            let selected = context.coordinator.selected_schema().await;
            render_list(&refreshed, selected.as_ref().map(|s| s.table_name.as_str()));
        }
        Err(e) => {
            report_panel_error(context, &e).await;
        }
    }
    Ok(())
}

pub async fn edit(context: &AppContext, table_name: &str) -> Result<()> {
    let Some(session) = require_session(context).await else {
        return Ok(());
    };

    let known = match context.registry.list(&session).await {
        Ok(known) => known,
        Err(e) => {
            report_panel_error(context, &e).await;
            return Ok(());
        }
    };
    let Some(existing) = known.iter().find(|s| s.table_name == table_name) else {
        println!("No schema named '{}'.", table_name);
        return Ok(());
    };

    // table_name is the identity key and stays fixed; only the DDL changes.
    let ddl_context: String = Input::new()
        .with_prompt(format!("DDL context for '{}'", table_name))
        .with_initial_text(existing.ddl_context.clone())
        .interact_text()?;
    let draft = SchemaDraft::new(table_name, ddl_context);

    match context.registry.update(&session, &known, &draft).await {
        Ok((mutation, refreshed)) => {
            context.coordinator.apply_schema_mutation(&mutation).await;
            println!(
                "{}",
                format!("Updated schema for '{}' successfully!", table_name).green()
            );
            let selected = context.coordinator.selected_schema().await;
            render_list(&refreshed, selected.as_ref().map(|s| s.table_name.as_str()));
        }
        Err(e) => {
            report_panel_error(context, &e).await;
        }
    }
    Ok(())
}

pub async fn delete(context: &AppContext, table_name: &str) -> Result<()> {
    let Some(session) = require_session(context).await else {
        return Ok(());
    };

    if !auth::confirm(&format!(
        "Are you sure you want to delete the schema for '{}'?",
        table_name
    ))? {
        return Ok(());
    }

    match context.registry.delete(&session, table_name).await {
        Ok((mutation, refreshed)) => {
            // Clears the selection one layer up when it named this table.
            context.coordinator.apply_schema_mutation(&mutation).await;
            println!(
                "{}",
                format!("Schema '{}' deleted successfully.", table_name).green()
            );
            let selected = context.coordinator.selected_schema().await;
            render_list(&refreshed, selected.as_ref().map(|s| s.table_name.as_str()));
        }
        Err(e) => {
            report_panel_error(context, &e).await;
        }
    }
    Ok(())
}

pub async fn select(context: &AppContext, table_name: &str) -> Result<()> {
    let Some(session) = require_session(context).await else {
        return Ok(());
    };

    let schemas = match context.registry.list(&session).await {
        Ok(schemas) => schemas,
        Err(e) => {
            report_panel_error(context, &e).await;
            return Ok(());
        }
    };

    match schemas.into_iter().find(|s| s.table_name == table_name) {
        Some(schema) => {
            println!(
                "{}",
                format!("Selected schema '{}' for generation.", schema.table_name).green()
            );
            context.coordinator.select_schema(schema).await;
        }
        None => println!("No schema named '{}'.", table_name),
    }
    Ok(())
}

pub async fn show(context: &AppContext) -> Result<()> {
    if require_session(context).await.is_none() {
        return Ok(());
    }
    match context.coordinator.selected_schema().await {
        Some(schema) => {
            println!("Table name: {}", schema.table_name.bold());
            println!("Schema: {}", schema.ddl_context);
        }
        None => println!("No schema selected; generation runs without table context."),
    }
    Ok(())
}
