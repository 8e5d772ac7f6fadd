//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pimberly catalog harvesting CLI
#[derive(Parser, Debug)]
#[command(name = "pimberly-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Credentials file (JSON)
    #[arg(short = 'C', long, global = true, default_value = "config.json")]
    pub config: PathBuf,

    /// Maximum attempts per page/item (default: retry forever, as the
    /// original scripts did)
    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,

    /// Maximum rows to print (0 = all)
    #[arg(long, global = true, default_value = "0")]
    pub limit: usize,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the product catalog as one flat table
    Products {
        /// Log each downloaded page
        #[arg(long)]
        log_pages: bool,

        /// Override the credentials file's date filter (YYYY-MM-DD)
        #[arg(long)]
        since_date: Option<String>,
    },

    /// Resolve parent products for a list of child identifiers
    Parents {
        /// Fetch parent identifiers only instead of full records
        #[arg(long)]
        id_only: bool,

        /// Comma-separated child ids (overrides the credentials file's items)
        #[arg(long)]
        ids: Option<String>,

        /// Log each resolved item
        #[arg(long)]
        log_items: bool,
    },
}
