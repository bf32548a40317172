use std::process::ExitCode;

use clap::Parser;
use healthconnect::AccountDirectory;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;
mod store;

use cli::{Cli, Commands};
use output::OutputFormat;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays clean for --json
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("healthconnect=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from_flag(cli.json);

    let store = store::open_store(&cli).await?;
    let directory = AccountDirectory::open(store).await;

    match &cli.command {
        Commands::Signup(args) => commands::signup(&directory, args, format).await,
        Commands::Login(args) => commands::login(&directory, args, format).await,
        Commands::Logout => commands::logout(&directory, format).await,
        Commands::Whoami => commands::whoami(&directory, format).await,
        Commands::Accounts => commands::accounts(&directory, format).await,
    }
}
