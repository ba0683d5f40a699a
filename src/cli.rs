//! Command-line interface for sheetdiff

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetdiff")]
#[command(about = "Compare two spreadsheet snapshots sheet by sheet")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./sheetdiff.json when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding <id>.json document snapshots
    #[arg(long, global = true)]
    pub documents_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two documents
    Compare {
        /// Identifier of the old document
        old: String,

        /// Identifier of the new document
        new: String,

        /// Output format: "text", "color", "json" or "html"
        #[arg(long, default_value = "text", value_parser = OutputFormat::parse)]
        format: OutputFormat,

        /// Stop after the structural report if sheet names differ
        #[arg(long)]
        halt_on_mismatch: bool,

        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Serve comparisons over HTTP at /compare/<old>/<new>
    Serve {
        /// Address to listen on (overrides the configured one)
        #[arg(long)]
        bind: Option<String>,
    },

    /// List documents available in the documents directory
    List,
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Color,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "color" | "colour" => Ok(Self::Color),
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            _ => Err(format!(
                "Invalid output format: {}. Use 'text', 'color', 'json' or 'html'",
                s
            )),
        }
    }

    /// Whether the report is meant for a terminal and progress bars make sense
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Text | Self::Color)
    }
}
