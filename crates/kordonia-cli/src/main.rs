//! CLI entry point - the composition root.
//!
//! Parses arguments, initializes logging, and dispatches to handlers.
//! Errors map to sysexits-style exit codes via `CliError`.

use clap::Parser;

use kordonia_cli::{Cli, CliError, Commands, handlers};
use kordonia_client::ApiClient;

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn api_client(base_url: Option<&str>) -> Result<ApiClient, CliError> {
    base_url.map_or_else(
        || Ok(ApiClient::with_defaults()),
        |url| ApiClient::new(url).map_err(|e| CliError::Arguments(e.to_string())),
    )
}

async fn run_command(command: Commands, base_url: Option<&str>) -> Result<(), CliError> {
    match command {
        Commands::Serve {
            port,
            allow_origins,
        } => handlers::serve::execute(port, allow_origins).await,
        Commands::Push => handlers::push::execute(&api_client(base_url)?).await,
        Commands::Watch { task_id } => {
            handlers::watch::execute(&api_client(base_url)?, task_id.into()).await
        }
        Commands::Run => handlers::run::execute(&api_client(base_url)?).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // No command provided - show help
    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Err(e) = run_command(command, cli.base_url.as_deref()).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}
