//! Command line argument parsing for the invidx CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// invidx - build and query boolean inverted indexes
#[derive(Parser, Debug, Clone)]
#[command(name = "invidx")]
#[command(about = "Build and query compact boolean inverted indexes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct InvidxArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Index configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "INVIDX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl InvidxArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Log level for the effective verbosity; `RUST_LOG` may still override it.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build an index from a JSONL document file and save it
    Build(BuildArgs),

    /// Run a boolean query against a saved index
    Search(SearchArgs),

    /// Print every term of a saved index with its postings
    Dump(DumpArgs),

    /// Show index statistics
    Stats(DumpArgs),

    /// Index a small built-in collection and run sample queries
    Demo,
}

/// Arguments for building an index
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Document file path (JSONL with `id` and `text`)
    #[arg(value_name = "DOCUMENT_FILE")]
    pub document_file: PathBuf,

    /// Destination index file
    #[arg(value_name = "INDEX_PATH")]
    pub index_path: PathBuf,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Index file to query
    #[arg(value_name = "INDEX_PATH")]
    pub index_path: PathBuf,

    /// Document file the index was built from; supplies the document universe
    #[arg(value_name = "DOCUMENT_FILE")]
    pub document_file: PathBuf,

    /// Terms to match
    #[arg(value_name = "TERM", required = true, num_args = 1..)]
    pub terms: Vec<String>,

    /// How the terms are combined
    #[arg(short, long, default_value = "and")]
    pub mode: MatchMode,

    /// Exclude documents containing this term (repeatable)
    #[arg(short, long, value_name = "TERM")]
    pub exclude: Vec<String>,
}

/// Arguments for commands that only read an index
#[derive(Parser, Debug, Clone)]
pub struct DumpArgs {
    /// Index file to read
    #[arg(value_name = "INDEX_PATH")]
    pub index_path: PathBuf,

    /// Document file the index was built from; supplies the document universe
    #[arg(value_name = "DOCUMENT_FILE")]
    pub document_file: PathBuf,
}

/// How search terms are combined
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every term must match
    And,
    /// Any term may match
    Or,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
