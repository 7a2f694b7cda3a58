//! Settle CLI entry point.

use anyhow::Result;
use clap::Parser;

use settle::cli::{commands, Cli, Commands};
use settle::infrastructure::config::ConfigLoader;
use settle::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        settle::cli::handle_error(err, json_mode);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let log_config = LogConfig::try_from(&config.logging)?;
    let _logger = LoggerImpl::init(&log_config)?;

    match cli.command {
        Commands::Render(args) => commands::render::execute(args, &config, cli.json).await,
        Commands::Config => commands::config::execute(&config, cli.json),
    }
}
