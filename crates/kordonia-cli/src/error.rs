//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! to exit codes and user-facing messages.

use kordonia_client::ClientError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing or validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// A request to the kordonia server failed.
    #[error("{0}")]
    Api(#[from] ClientError),

    /// The server could not be started or fell over.
    #[error("Server error: {0}")]
    Server(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 69: Service unavailable (see sysexits.h EX_UNAVAILABLE)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2,
            Self::Api(_) => 69,
            Self::Server(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_sysexits() {
        assert_eq!(CliError::Arguments("bad".into()).exit_code(), 2);
        assert_eq!(
            CliError::Api(ClientError::InvalidResponse("oops".into())).exit_code(),
            69
        );
        assert_eq!(CliError::Server("down".into()).exit_code(), 1);
    }
}
