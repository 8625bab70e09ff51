use crate::config::Config;
use crate::config::compat::export_settings_toml;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Export the effective settings as TOML
pub async fn export_command(config: &Config, path: &Path) -> Result<()> {
    export_settings_toml(&config.options, path).await?;
    println!("{} settings to {}", "Exported".green(), path.display());
    Ok(())
}
