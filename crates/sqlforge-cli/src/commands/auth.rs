//! Credential panel: login, registration, recovery, logout.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input, Password, Select};
use sqlforge_application::PasswordRecovery;
use sqlforge_core::auth::{PasswordResetForm, QuestionAnswer, RegistrationForm};

use crate::bootstrap::AppContext;

pub async fn login(context: &AppContext) -> Result<()> {
    if let Some(session) = context.coordinator.session().await {
        println!("Already logged in as '{}'. Log out first.", session.username);
        return Ok(());
    }

    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    match context.credentials.login(&username, &password).await {
        Ok(session) => {
            let username = session.username.clone();
            context.coordinator.login_succeeded(session).await?;
            println!("{}", format!("Logged in as '{}'.", username).green());
        }
        Err(e) => println!("{}", format!("Login failed: {}", e).red()),
    }
    Ok(())
}

pub async fn logout(context: &AppContext) -> Result<()> {
    if !context.coordinator.is_logged_in().await {
        println!("Not logged in.");
        return Ok(());
    }
    context.coordinator.logout().await?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(context: &AppContext) -> Result<()> {
    match context.coordinator.session().await {
        Some(session) => println!("Logged in as '{}'.", session.username),
        None => println!("Not logged in."),
    }
    Ok(())
}

pub async fn register(context: &AppContext) -> Result<()> {
    if context.coordinator.is_logged_in().await {
        println!("Already logged in. Log out before registering a new account.");
        return Ok(());
    }

    println!("{}", "Register a new account".bold());
    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let password = Password::new().with_prompt("Password (min 6 characters)").interact()?;
    let confirm_password = Password::new().with_prompt("Confirm password").interact()?;
    let full_name: String = Input::new()
        .with_prompt("Full name (optional)")
        .allow_empty(true)
        .interact_text()?;

    println!("Password recovery questions (used to reset your password):");
    let mut questions: [QuestionAnswer; 3] = Default::default();
    for (i, slot) in questions.iter_mut().enumerate() {
        slot.question = Input::new()
            .with_prompt(format!("Question {} (e.g. Pet's name)", i + 1))
            .interact_text()?;
        slot.answer = Input::new()
            .with_prompt(format!("Answer {}", i + 1))
            .interact_text()?;
    }

    let form = RegistrationForm {
        username,
        password,
        confirm_password,
        full_name,
        questions,
    };

    match context.credentials.register(&form).await {
        Ok(session) => {
            let username = session.username.clone();
            context.coordinator.login_succeeded(session).await?;
            println!(
                "{}",
                format!("Registration successful! Logged in as '{}'.", username).green()
            );
        }
        Err(e) => println!("{}", format!("Registration failed: {}", e).red()),
    }
    Ok(())
}

/// Drives the two-step recovery flow until it completes or the user
/// backs out. Step one collects a username; step two shows the fetched
/// questions as labels and collects a new password plus three answers.
pub async fn recover(context: &AppContext) -> Result<()> {
    let mut recovery = PasswordRecovery::new(context.auth_api.clone());

    loop {
        // Step 1 of 2: confirm the username.
        let username: String = Input::new()
            .with_prompt("Username (empty to cancel)")
            .allow_empty(true)
            .interact_text()?;
        if username.trim().is_empty() {
            recovery.cancel();
            println!("Recovery cancelled.");
            return Ok(());
        }

        match recovery.submit_username(&username).await {
            Ok(_) => {}
            Err(e) => {
                println!("{}", format!("Error: {}", e).red());
                continue;
            }
        }

        // Step 2 of 2: answer the stored questions.
        'answers: loop {
            let questions = recovery
                .questions()
                .expect("step two requires fetched questions")
                .clone();

            let new_password = Password::new()
                .with_prompt("New password (min 6 characters)")
                .interact()?;
            let confirm_new_password =
                Password::new().with_prompt("Confirm new password").interact()?;

            let mut answers: [String; 3] = Default::default();
            for (i, answer) in answers.iter_mut().enumerate() {
                *answer = Input::new()
                    .with_prompt(questions[i].clone())
                    .interact_text()?;
            }

            let form = PasswordResetForm {
                new_password,
                confirm_new_password,
                answers,
            };

            match recovery.submit_answers(&form).await {
                Ok(()) => {
                    println!(
                        "{}",
                        "Password reset successful! Please log in with your new password.".green()
                    );
                    return Ok(());
                }
                Err(e) => {
                    println!("{}", format!("Reset failed: {}", e).red());
                    let choice = Select::new()
                        .with_prompt("What next?")
                        .items(&["Try again", "Go back to username", "Cancel"])
                        .default(0)
                        .interact()?;
                    match choice {
                        0 => continue 'answers,
                        1 => {
                            recovery.go_back();
                            break 'answers;
                        }
                        _ => {
                            recovery.cancel();
                            println!("Recovery cancelled.");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

/// Shared confirmation prompt for destructive operations.
pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
