//! Clerk CLI - statement extraction and adaptive categorization
//!
//! Usage:
//!   clerk extract statement.csv            Extract transactions
//!   clerk categorize statement.csv         Extract and categorize
//!   clerk correct --description ... --to   Record a category correction
//!   clerk preferences                      Show learned preferences

mod cli;
mod commands;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Extract {
            file,
            format,
            summary,
        } => commands::cmd_extract(&file, format, summary),
        Commands::Categorize { file, format, user } => {
            commands::cmd_categorize(cli.store, cli.config.as_deref(), &file, format, &user).await
        }
        Commands::Correct {
            user,
            description,
            amount,
            date,
            from,
            to,
        } => commands::cmd_correct(
            cli.store,
            cli.config.as_deref(),
            &commands::CorrectionRequest {
                user,
                description,
                amount,
                date,
                from,
                to,
            },
        ),
        Commands::Preferences { user } => commands::cmd_preferences(cli.store, &user),
    }
}
