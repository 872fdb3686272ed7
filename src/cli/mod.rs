//! CLI module
//!
//! Command-line interface for walking collections.
//!
//! # Commands
//!
//! - `list` - Print every object of a collection and the cursor to resume from

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
