//! CLI argument definitions

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clerk_core::DocumentFormat;

#[derive(Parser)]
#[command(name = "clerk", version, about = "Statement extraction and adaptive categorization")]
pub struct Cli {
    /// Path to the preference store file (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Path to an engine config override file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract transactions from a statement document
    Extract {
        /// Input file (.csv for tabular, .txt for extracted text)
        file: PathBuf,

        /// Force the document format instead of inferring it from the
        /// file extension
        #[arg(long)]
        format: Option<DocumentFormat>,

        /// Print only the date-range/amount summary
        #[arg(long)]
        summary: bool,
    },

    /// Extract a document and categorize its transactions
    Categorize {
        /// Input file (.csv for tabular, .txt for extracted text)
        file: PathBuf,

        /// Force the document format instead of inferring it from the
        /// file extension
        #[arg(long)]
        format: Option<DocumentFormat>,

        /// User whose learned preferences apply
        #[arg(long, default_value = "default")]
        user: String,
    },

    /// Record a category correction so future predictions learn from it
    Correct {
        /// User the correction belongs to
        #[arg(long, default_value = "default")]
        user: String,

        /// Transaction description as it appeared on the statement
        #[arg(long)]
        description: String,

        /// Transaction amount
        #[arg(long)]
        amount: f64,

        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Category the system had assigned
        #[arg(long)]
        from: Option<String>,

        /// Category it should have been
        #[arg(long)]
        to: String,
    },

    /// Show a user's learned preferences and correction analytics
    Preferences {
        #[arg(long, default_value = "default")]
        user: String,
    },
}
