//! CLI module
//!
//! Command-line interface over the pagination and endpoint primitives.
//!
//! # Commands
//!
//! - `fetch` - Call one endpoint and print the settled request state
//! - `browse` - Page through the configured source as a table
//! - `validate` - Check a configuration file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
