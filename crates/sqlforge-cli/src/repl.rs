//! Interactive shell loop.
//!
//! Each input line is parsed through the clap grammar and dispatched to
//! a panel handler. The workspace coordinator stays alive for the whole
//! session, so selection and the history epoch survive across commands.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::bootstrap::AppContext;
use crate::commands::history::HistoryPanel;
use crate::commands::{self, HistoryAction, SchemaAction, ShellCommand, ShellLine};

pub async fn run(context: AppContext) -> Result<()> {
    println!("{}", "sqlforge - Text-to-SQL workspace".bold());
    match context.coordinator.session().await {
        Some(session) => println!("Welcome back, '{}'.", session.username),
        None => println!("Type 'login' or 'register' to get started, 'help' for commands."),
    }

    let mut editor = DefaultEditor::new()?;
    let mut history_panel = HistoryPanel::new();

    loop {
        let prompt = match context.coordinator.session().await {
            Some(session) => format!("sqlforge({})> ", session.username),
            None => "sqlforge> ".to_string(),
        };

        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(line);

        if line == "help" {
            print_help();
            continue;
        }

        let parsed = match ShellLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed,
            Err(e) => {
                // clap renders its own usage/help output.
                let _ = e.print();
                continue;
            }
        };

        let done = dispatch(&context, &mut history_panel, parsed.command).await;
        match done {
            Ok(true) => break,
            Ok(false) => {}
            Err(e) => println!("{}", format!("Error: {}", e).red()),
        }
    }

    println!("Bye.");
    Ok(())
}

/// Runs one command. Returns true when the shell should exit.
async fn dispatch(
    context: &AppContext,
    history_panel: &mut HistoryPanel,
    command: ShellCommand,
) -> Result<bool> {
    match command {
        ShellCommand::Login => commands::auth::login(context).await?,
        ShellCommand::Register => commands::auth::register(context).await?,
        ShellCommand::Recover => commands::auth::recover(context).await?,
        ShellCommand::Logout => commands::auth::logout(context).await?,
        ShellCommand::Whoami => commands::auth::whoami(context).await?,
        ShellCommand::Schema { action } => match action {
            SchemaAction::List => commands::schema::list(context).await?,
            SchemaAction::Add => commands::schema::add(context).await?,
            SchemaAction::Edit { table_name } => {
                commands::schema::edit(context, &table_name).await?
            }
            SchemaAction::Delete { table_name } => {
                commands::schema::delete(context, &table_name).await?
            }
            SchemaAction::Select { table_name } => {
                commands::schema::select(context, &table_name).await?
            }
            SchemaAction::Show => commands::schema::show(context).await?,
        },
        ShellCommand::Generate { no_intent } => {
            commands::query::generate(context, !no_intent).await?
        }
        ShellCommand::History { action } => match action {
            None => history_panel.show(context, false).await?,
            Some(HistoryAction::Refresh) => history_panel.show(context, true).await?,
            Some(HistoryAction::Clear) => history_panel.clear(context).await?,
        },
        ShellCommand::Exit => return Ok(true),
    }
    Ok(false)
}

fn print_help() {
    println!("Commands:");
    println!("  login / register / recover / logout / whoami");
    println!("  schema list|add|edit <table>|delete <table>|select <table>|show");
    println!("  generate [--no-intent]");
    println!("  history [refresh|clear]");
    println!("  exit");
}
