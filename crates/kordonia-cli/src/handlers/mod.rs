//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(...) -> Result<(), CliError>`
//! - Thin wrappers that validate input, call the client or server crate,
//!   and format output for the terminal.

pub mod push;
pub mod run;
pub mod serve;
pub mod watch;
