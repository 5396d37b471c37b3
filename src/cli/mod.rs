//! CLI module - interactive movie search and config helpers.
//!
//! Argument parsing uses clap; with no subcommand the interactive menu runs.

mod commands;
pub mod console;
pub mod format;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cinesearch - Interactive movie catalog search
#[derive(Parser)]
#[command(name = "cinesearch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default search locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create default config file
    Init,

    /// Print the effective configuration with passwords masked
    #[command(alias = "show-config")]
    Config,
}

pub use commands::*;
