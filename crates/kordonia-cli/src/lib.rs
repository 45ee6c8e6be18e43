//! Command-line interface for kordonia.
//!
//! The binary wires four commands over the other crates: `serve` runs the
//! HTTP server, `push` creates a task, `watch` follows one, and `run` does
//! both in sequence. Handlers stay thin; command logic lives behind the
//! client and server crates.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings for planned test infrastructure
#[cfg(test)]
use tokio_test as _;

// Dependencies used by main.rs
use anyhow as _;
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod progress;

// Re-export primary types for convenient access
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
pub use progress::ProgressPrinter;
