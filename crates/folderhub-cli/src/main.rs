//! FolderHub CLI entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod output;

use commands::Cli;
use folderhub_core::config::AppConfig;
use folderhub_core::config::logging::LoggingConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = run(&cli, &config).await {
        output::print_error(&e.message);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, config: &AppConfig) -> folderhub_core::AppResult<()> {
    tracing::debug!(base_url = %config.remote.base_url, "Starting FolderHub CLI v{}", env!("CARGO_PKG_VERSION"));
    cli.execute(config).await
}

/// Initialize tracing/logging. Logs go to stderr so they never mix with
/// command output.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
