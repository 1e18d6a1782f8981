//! LitArt CLI - Storage bootstrap and backend health tools.
//!
//! The backend owns every schema, so there are no migrations to run;
//! "preparing persistence" here means making sure the storage bucket and
//! its access policies exist, which normally happens at gallery startup
//! but can be driven standalone.
//!
//! # Usage
//!
//! ```bash
//! # Ensure the avatars bucket and its policies exist
//! litart-cli storage bootstrap
//!
//! # Probe the backend auth service
//! litart-cli backend health
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "litart-cli")]
#[command(author, version, about = "LitArt Gallery CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage object storage
    Storage {
        #[command(subcommand)]
        action: StorageAction,
    },
    /// Probe the remote backend
    Backend {
        #[command(subcommand)]
        action: BackendAction,
    },
}

#[derive(Subcommand)]
enum StorageAction {
    /// Ensure the avatars bucket and its access policies exist
    Bootstrap,
}

#[derive(Subcommand)]
enum BackendAction {
    /// Check that the backend auth service is reachable
    Health,
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Storage { action } => match action {
            StorageAction::Bootstrap => commands::storage::bootstrap().await?,
        },
        Commands::Backend { action } => match action {
            BackendAction::Health => commands::backend::health().await?,
        },
    }
    Ok(())
}
