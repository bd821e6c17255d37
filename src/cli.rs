//! Command-line interface for rosterdiff

use crate::projection::SortField;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rosterdiff")]
#[command(about = "Compare player ratings between two seasons of a roster export")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to $ROSTERDIFF_CONFIG or ./rosterdiff.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Compare every player present in both seasons
    Compare {
        /// Roster file (csv, tsv, json, jsonl, parquet, xlsx, xls)
        input: PathBuf,

        /// Season to compare from
        #[arg(long)]
        from: String,

        /// Season to compare to
        #[arg(long)]
        to: String,

        /// Comma separated name fragments; a player matching any is kept
        #[arg(long, default_value = "")]
        filter: String,

        /// Sort column; repeat the same column to toggle descending
        #[arg(long = "sort", value_parser = SortField::parse)]
        sort: Vec<SortField>,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Show one player's ratings across all seasons
    History {
        /// Roster file
        input: PathBuf,

        /// Exact player name
        #[arg(long)]
        player: String,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// List the distinct players in a roster file
    Players {
        /// Roster file
        input: PathBuf,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// List the seasons present in a roster file
    Seasons {
        /// Roster file
        input: PathBuf,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Interactive session reading commands from stdin
    View {
        /// Roster file to load on start
        input: Option<PathBuf>,
    },
}

/// Parse output format string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}
