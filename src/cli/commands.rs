//! CLI commands and argument parsing

use crate::types::Method;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cursor-paginated table browser and one-shot endpoint fetcher
#[derive(Parser, Debug)]
#[command(name = "pagefetch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Call one endpoint and print the settled request state
    Fetch {
        /// HTTP method (GET, POST, PATCH, DELETE)
        #[arg(short, long, default_value = "GET")]
        method: Method,

        /// Absolute URL, or a path relative to the configured base URL
        #[arg(short, long)]
        url: String,

        /// JSON request body (POST and PATCH)
        #[arg(long)]
        body: Option<String>,

        /// Query parameter as key=value (repeatable)
        #[arg(short, long, value_parser = parse_key_value)]
        query: Vec<(String, String)>,

        /// Header as key=value (repeatable)
        #[arg(short = 'H', long, value_parser = parse_key_value)]
        header: Vec<(String, String)>,
    },

    /// Browse the configured source page by page
    Browse {
        /// Walk forward through up to N pages without prompting
        #[arg(long)]
        pages: Option<usize>,
    },

    /// Validate the configuration file
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// Parse `key=value`
fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}
