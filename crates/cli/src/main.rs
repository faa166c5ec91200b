//! MegaPrime CLI - Database migrations and site management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! mp-cli migrate
//!
//! # Create the admin account (email must match MEGAPRIME_ADMIN_EMAIL)
//! mp-cli admin create -e admin@megaprime.in -p 'long-random-password'
//!
//! # Write the default page sections (overwrites edits)
//! mp-cli content seed
//!
//! # Only add sections that don't exist yet
//! mp-cli content seed --missing-only
//!
//! # Show stored sections
//! mp-cli content list
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin create` - Create the admin account
//! - `content seed` / `content list` - Manage page content

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use secrecy::SecretString;

mod commands;

#[derive(Parser)]
#[command(name = "mp-cli")]
#[command(author, version, about = "MegaPrime CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage the admin account
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Manage page content
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create the admin account
    Create {
        /// Admin email address (must equal `MEGAPRIME_ADMIN_EMAIL`)
        #[arg(short, long)]
        email: String,

        /// Admin password (min 8 characters)
        #[arg(short, long, env = "MEGAPRIME_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Subcommand)]
enum ContentAction {
    /// Write the built-in default sections
    Seed {
        /// Keep existing sections instead of overwriting them
        #[arg(long)]
        missing_only: bool,
    },
    /// List stored sections
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), commands::CliError> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create { email, password } => {
                commands::admin::create(&email, &SecretString::from(password)).await?;
            }
        },
        Commands::Content { action } => match action {
            ContentAction::Seed { missing_only } => {
                commands::content::seed(missing_only).await?;
            }
            ContentAction::List => commands::content::list().await?,
        },
    }
    Ok(())
}
