use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level parser for the `quotebook` binary.
#[derive(Debug, Parser)]
#[command(name = "quotebook", version, about = "Quotebook - random quotes with a simulated sync")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite file overriding `storage.db_path`
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print core wiring info
    Ping,
    /// Show a random quote under the saved category filter
    Show,
    /// List category selector options
    Categories,
    /// Save a category filter ("all" clears it) and show a quote
    Filter { category: String },
    /// Add a quote
    Add {
        #[arg(long)]
        text: String,
        #[arg(long)]
        category: String,
    },
    /// Write every quote to a JSON file
    Export {
        #[arg(long, default_value = "quotes.json")]
        out: PathBuf,
    },
    /// Append quotes from a JSON file
    Import { file: PathBuf },
    /// Pull from the remote endpoint once
    Sync,
    /// Sync on the configured interval
    Watch {
        /// Stop after this many sync outcomes
        #[arg(long)]
        ticks: Option<usize>,
    },
}
