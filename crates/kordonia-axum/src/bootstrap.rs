//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the web adapter.

use std::sync::Arc;

use anyhow::Result;
use kordonia_core::ports::TaskEventEmitter;
use kordonia_core::task::{RunnerConfig, TaskRegistry};
use kordonia_core::TracingEmitter;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (the page is typically served from another port).
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Pacing of the task runner.
    pub runner: RunnerConfig,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Default config: port 8080, one progress tick per second.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            port: 8080,
            runner: RunnerConfig::default(),
            cors: CorsConfig::default(),
        }
    }

    /// Set the listen port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Registry of running and finished tasks.
    pub tasks: Arc<TaskRegistry>,
}

/// Bootstrap the Axum server services.
#[must_use]
pub fn bootstrap(config: &ServerConfig) -> AxumContext {
    // Every task event lands in the server log, one line per tick.
    let emitter: Arc<dyn TaskEventEmitter> = Arc::new(TracingEmitter::new());
    let tasks = Arc::new(TaskRegistry::new(config.runner, emitter));

    AxumContext { tasks }
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config);
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("kordonia server listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::with_defaults();
        assert_eq!(config.port, 8080);
        assert!(matches!(config.cors, CorsConfig::AllowAll));
    }

    #[tokio::test]
    async fn bootstrap_starts_with_no_tasks() {
        let ctx = bootstrap(&ServerConfig::with_defaults());
        assert!(ctx.tasks.is_empty().await);
    }
}
