//! Main commands enum and primary subcommands.
//!
//! This module defines the available commands for the CLI tool.

use clap::Subcommand;

/// Available commands for the kordonia task tool.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
        /// Restrict CORS to these origins (repeatable; default allows all)
        #[arg(long = "allow-origin")]
        allow_origins: Vec<String>,
    },

    /// Create a task and print its id
    Push,

    /// Watch an existing task's progress until it completes
    Watch {
        /// Identifier of the task to watch
        task_id: String,
    },

    /// Create a task and watch it to completion
    Run,
}
