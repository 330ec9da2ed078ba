//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TOPdesk and Zenya tools from the command line
#[derive(Parser, Debug)]
#[command(name = "deskbridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML, or JSON with a .json extension).
    /// Environment variables are used when omitted.
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output (debug logging, raw search items)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tool catalog
    Tools,

    /// Call one tool and print its result
    Call {
        /// Tool name, e.g. list_knowledge
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(long)]
        args: Option<String>,
    },

    /// Acquire a token from every configured backend
    Check,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON, one value per line
    Json,
    /// Indented JSON
    Pretty,
}
