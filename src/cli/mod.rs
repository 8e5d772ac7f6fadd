//! Command-line interface
//!
//! Reads a JSON credentials file, runs a harvest, and prints the resulting
//! table with the cron-log console formatting the original scripts used.

mod commands;
mod console;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
