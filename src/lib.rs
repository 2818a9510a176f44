pub mod commands;
pub mod config;
pub mod presentation;
pub mod transport;
pub mod upload;

use anyhow::Result;
use clap::Parser;
use commands::{Cli, Command};
use config::AppConfig;

pub async fn run() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
        config.validate()?;
    }

    log::info!("TikTok uploader ready. Backend: {}", config.base_url);

    match &cli.command {
        Command::Upload(args) => commands::upload::upload(&config, args).await,
        Command::Check(args) => commands::upload::check(&config, args),
        Command::Config => commands::config::show(&config),
    }
}
