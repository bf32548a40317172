//! CLI argument definitions for the HealthConnect binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// JSON file in the data directory (default, survives restarts)
    Json,
    /// In-memory only (nothing survives the process)
    Inmemory,
}

/// HealthConnect account manager
#[derive(Parser, Debug)]
#[command(name = "healthconnect")]
#[command(about = "HealthConnect: register, log in and manage the active session")]
#[command(version)]
pub struct Cli {
    /// Data directory holding healthconnect.json
    #[arg(short = 'D', long, global = true, env = "HEALTHCONNECT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage backend to use
    #[arg(long, global = true, default_value = "json", env = "HEALTHCONNECT_STORE")]
    pub store: StoreKind,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new account
    Signup(SignupArgs),
    /// Log in with an email or username
    Login(LoginArgs),
    /// End the active session
    Logout,
    /// Show the active session
    Whoami,
    /// List registered accounts
    Accounts,
}

/// Arguments for the signup command
///
/// Missing values are passed through as empty so every field gets its own
/// validation message.
#[derive(clap::Args, Debug)]
pub struct SignupArgs {
    /// Full name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Password (at least 8 characters)
    #[arg(long, default_value = "", env = "HEALTHCONNECT_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Password confirmation
    #[arg(long, default_value = "")]
    pub confirm: String,
}

/// Arguments for the login command
#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    /// Email or username
    #[arg(default_value = "")]
    pub identifier: String,

    /// Password
    #[arg(long, default_value = "", env = "HEALTHCONNECT_PASSWORD", hide_env_values = true)]
    pub password: String,
}
