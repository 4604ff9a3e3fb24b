//! relmatch - Package provenance matching
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use relmatch::cli::commands::open_store;
use relmatch::cli::{Cli, Commands};
use relmatch::config::{Config, ConfigManager};
use relmatch::error::RelmatchResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(code) = e.code() {
                eprintln!("{} {}", style("Code:").dim(), code);
            }
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RelmatchResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);
    debug!("Using config {}", config_manager.path().display());

    // Dispatch to command
    match cli.command {
        Commands::Match(args) => {
            let store = open_store(cli.store, &config, config_manager.path())?;
            relmatch::cli::commands::match_source(args, store.as_ref(), &config).await
        }
        Commands::MatchCompiled(args) => {
            let store = open_store(cli.store, &config, config_manager.path())?;
            relmatch::cli::commands::match_compiled(args, store.as_ref(), &config).await
        }
        Commands::DependencyKey(args) => relmatch::cli::commands::dependency_key(args).await,
        Commands::Config(args) => {
            relmatch::cli::commands::config(args, &config_manager, &config).await
        }
    }
}

/// Initialize logging: 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("relmatch=warn"),
        1 => EnvFilter::new("relmatch=info"),
        _ => EnvFilter::new("relmatch=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
