//! Serve command handler.

use kordonia_axum::{ServerConfig, start_server};

use crate::error::CliError;

/// Run the HTTP server until interrupted.
pub async fn execute(port: u16, allow_origins: Vec<String>) -> Result<(), CliError> {
    let mut config = ServerConfig::with_defaults().with_port(port);
    if !allow_origins.is_empty() {
        config = config.with_allowed_origins(allow_origins);
    }

    start_server(config)
        .await
        .map_err(|e| CliError::Server(e.to_string()))
}
