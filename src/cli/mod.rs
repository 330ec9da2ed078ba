//! CLI module
//!
//! Command-line interface over the tool surface.
//!
//! # Commands
//!
//! - `tools` - Print the tool catalog as JSON
//! - `call` - Call one tool with JSON arguments
//! - `check` - Acquire a token from each configured backend

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;

#[cfg(test)]
mod tests;
