use crate::config::{default_config_path, AppConfig};
use anyhow::{Context, Result};

pub fn render(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize configuration")
}

pub fn show(config: &AppConfig) -> Result<()> {
    if let Some(path) = default_config_path() {
        println!("# default location: {}", path.display());
    }
    println!("{}", render(config)?);
    Ok(())
}
