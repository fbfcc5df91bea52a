//! Ticklist CLI - Database migrations and account management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! ticklist migrate
//!
//! # Create a user account
//! ticklist user create -n "Alice Smith" -u alice -p "correct horse battery staple"
//!
//! # Look up a user account
//! ticklist user show 1
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user create` - Create a user account
//! - `user show` - Look up a user account by ID

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ticklist")]
#[command(author, version, about = "Ticklist CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user account
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Login username
        #[arg(short, long)]
        username: String,

        /// Password (digested before storage, never stored in plaintext)
        #[arg(short, long)]
        password: String,
    },
    /// Show a user account by ID
    Show {
        /// User ID
        id: i32,
    },
}

#[tokio::main]
async fn main() {
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                name,
                username,
                password,
            } => {
                commands::user::create(&name, &username, &password).await?;
            }
            UserAction::Show { id } => {
                commands::user::show(id).await?;
            }
        },
    }
    Ok(())
}
