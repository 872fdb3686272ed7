//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Walk paginated collection endpoints
#[derive(Parser, Debug)]
#[command(name = "paged-collection")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Base URL, overriding the settings file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// API key, overriding the settings file
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
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
    /// Print every object of a collection
    List {
        /// Collection path (e.g. /comments)
        path: String,

        /// Maximum number of objects to print
        #[arg(long)]
        limit: Option<usize>,

        /// Objects per request (0 = server default)
        #[arg(long, default_value = "0")]
        batch_size: usize,

        /// Resume from a cursor printed by an earlier run
        #[arg(long)]
        cursor: Option<String>,

        /// Extra query parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Use the blocking transport instead of the async one
        #[arg(long)]
        blocking: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one object per line)
    Json,
    /// Indented JSON
    Pretty,
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}
