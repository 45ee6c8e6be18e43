//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for the kordonia task tool.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "kordonia")]
#[command(about = "Trigger server tasks and watch their progress")]
#[command(version)]
pub struct Cli {
    /// Base URL of the kordonia server
    #[arg(long = "base-url", global = true, env = "KORDONIA_BASE_URL")]
    pub base_url: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
