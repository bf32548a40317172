//! Subcommand handlers.
//!
//! Each handler drives the [`AccountDirectory`] and renders the outcome. The
//! JSON form mirrors the result objects the web front end consumes:
//! `{ "success": bool, "message"?: .., "errors"?: .., "user"?: .. }`.

use std::process::ExitCode;

use healthconnect::{
    Account, AccountDirectory, Error, Session,
    account::{AccountError, FieldErrors, LoginError},
};
use serde_json::{Value, json};

use crate::{
    cli::{LoginArgs, SignupArgs},
    output::{OutputFormat, print_json, print_table},
};

type CommandResult = Result<ExitCode, Box<dyn std::error::Error>>;

/// Public view of an account. The password hash stays out of all output.
fn account_summary(account: &Account) -> Value {
    json!({
        "id": account.id,
        "name": account.name,
        "email": account.email,
        "username": account.username(),
        "createdAt": account.created_at,
    })
}

const SIGNUP_MESSAGE: &str = "Account created successfully! You can now log in.";
const LOGIN_MESSAGE: &str = "Login successful!";

fn signup_success(account: &Account) -> Value {
    json!({
        "success": true,
        "message": SIGNUP_MESSAGE,
        "user": account_summary(account),
    })
}

fn signup_failure(errors: &FieldErrors) -> Value {
    json!({
        "success": false,
        "errors": errors,
    })
}

fn login_success(session: &Session) -> Value {
    json!({
        "success": true,
        "message": LOGIN_MESSAGE,
        "user": session,
    })
}

fn login_failure(error: &LoginError) -> Value {
    json!({
        "success": false,
        "message": error.to_string(),
    })
}

pub async fn signup(
    directory: &AccountDirectory,
    args: &SignupArgs,
    format: OutputFormat,
) -> CommandResult {
    match directory
        .register_account(&args.name, &args.email, &args.password, &args.confirm)
        .await
    {
        Ok(account) => {
            match format {
                OutputFormat::Json => print_json(&signup_success(&account))?,
                OutputFormat::Human => {
                    println!("{SIGNUP_MESSAGE}");
                    println!("Username: {}", account.username());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::Account(AccountError::Validation(errors))) => {
            match format {
                OutputFormat::Json => print_json(&signup_failure(&errors))?,
                OutputFormat::Human => {
                    eprintln!("Please fix the errors below");
                    for (field, message) in errors.iter() {
                        eprintln!("  {field}: {message}");
                    }
                }
            }
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login(
    directory: &AccountDirectory,
    args: &LoginArgs,
    format: OutputFormat,
) -> CommandResult {
    match directory.login(&args.identifier, &args.password).await {
        Ok(session) => {
            match format {
                OutputFormat::Json => print_json(&login_success(&session))?,
                OutputFormat::Human => {
                    println!("{LOGIN_MESSAGE}");
                    println!("Welcome, {}", session.name);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => match e.login_error() {
            Some(login_err) => {
                match format {
                    OutputFormat::Json => print_json(&login_failure(login_err))?,
                    OutputFormat::Human => eprintln!("{login_err}"),
                }
                Ok(ExitCode::FAILURE)
            }
            None => Err(e.into()),
        },
    }
}

pub async fn logout(directory: &AccountDirectory, format: OutputFormat) -> CommandResult {
    let was_authenticated = directory.is_authenticated().await;
    directory.logout().await?;
    match format {
        OutputFormat::Json => print_json(&json!({ "success": true }))?,
        OutputFormat::Human if was_authenticated => println!("Logged out."),
        OutputFormat::Human => println!("No active session."),
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn whoami(directory: &AccountDirectory, format: OutputFormat) -> CommandResult {
    let session: Option<Session> = directory.current_session().await;
    match format {
        OutputFormat::Json => print_json(&session)?,
        OutputFormat::Human => match &session {
            Some(s) => {
                println!("{} <{}>", s.name, s.email);
                println!("Username:  {}", s.username);
                println!("Logged in: {}", s.login_time);
            }
            None => println!("Not logged in."),
        },
    }
    Ok(if session.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub async fn accounts(directory: &AccountDirectory, format: OutputFormat) -> CommandResult {
    let accounts = directory.accounts().await;
    match format {
        OutputFormat::Json => {
            let listing: Vec<Value> = accounts.iter().map(account_summary).collect();
            print_json(&listing)?;
        }
        OutputFormat::Human if accounts.is_empty() => println!("No accounts registered."),
        OutputFormat::Human => {
            let rows: Vec<Vec<String>> = accounts
                .iter()
                .map(|a| {
                    vec![
                        a.username(),
                        a.name.clone(),
                        a.email.clone(),
                        a.created_at.clone(),
                    ]
                })
                .collect();
            print_table(&["USERNAME", "NAME", "EMAIL", "CREATED"], &rows);
        }
    }
    Ok(ExitCode::SUCCESS)
}
