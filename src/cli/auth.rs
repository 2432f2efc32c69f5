//! Login, logout and status commands

use std::io::{self, BufRead, Write};

use crate::api::{Credentials, ExpenseBackend};
use crate::config::{paths::ExpensePaths, settings::Settings};
use crate::dashboard::{Dashboard, LoginOutcome};
use crate::error::{ExpenseError, ExpenseResult};

/// Log in and remember the email for next time
pub fn handle_login<B: ExpenseBackend>(
    dashboard: &mut Dashboard<B>,
    settings: &mut Settings,
    paths: &ExpensePaths,
    email: Option<String>,
) -> ExpenseResult<()> {
    let email = match email.or_else(|| settings.last_email.clone()) {
        Some(email) => email,
        None => prompt_line("Email: ")?,
    };
    let password = rpassword::prompt_password(format!("Password for {}: ", email))
        .map_err(|e| ExpenseError::Io(format!("Failed to read password: {}", e)))?;

    let credentials = Credentials::new(email, password)?;
    let outcome = dashboard.login(&credentials)?;

    settings.last_email = Some(credentials.email().to_string());
    settings.save(paths)?;

    println!("Logged in as {}", credentials.email());
    match outcome {
        LoginOutcome::Loaded => println!(
            "  {} categories, {} transactions",
            dashboard.categories().len(),
            dashboard.transactions().len()
        ),
        LoginOutcome::LoadFailed(e) => {
            println!("  Could not load your data: {}", e);
            println!("  Run 'expense status' to retry.");
        }
    }
    Ok(())
}

/// Drop the stored session
pub fn handle_logout<B: ExpenseBackend>(dashboard: &mut Dashboard<B>) -> ExpenseResult<()> {
    if dashboard.logout()? {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

/// Report whether a session is stored and still accepted
pub fn handle_status<B: ExpenseBackend>(
    dashboard: &mut Dashboard<B>,
    settings: &Settings,
    api_url: &str,
) -> ExpenseResult<()> {
    println!("Backend: {}", api_url);

    if !dashboard.is_logged_in() {
        println!("Not logged in.");
        return Ok(());
    }

    dashboard.refresh()?;
    match &settings.last_email {
        Some(email) => println!("Logged in as {}", email),
        None => println!("Logged in"),
    }
    println!(
        "  {} categories, {} transactions",
        dashboard.categories().len(),
        dashboard.transactions().len()
    );
    Ok(())
}

fn prompt_line(prompt: &str) -> ExpenseResult<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
