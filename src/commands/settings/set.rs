use crate::config::Config;
use crate::config::options::registrations::general;
use crate::config::options::{Namespace, OptionType};
use crate::constants::UpdateLevel;
use crate::page::needs_server_warning;
use anyhow::Result;
use colored::Colorize;
use log::info;

/// Set the value of one option; the input is parsed as the declared type
pub async fn set_command(config: &Config, name: &str, value: &str) -> Result<()> {
    info!("Setting {} to {}", name, value);

    let def = config.options.registry().resolve(name)?;
    let input = if def.ty == OptionType::Text {
        value.trim()
    } else {
        value
    };

    let parsed = def.ty.parse(&def.path(), input)?;
    if def.namespace == Namespace::Setting && def.key == general::UPDATE_LEVEL {
        if let Some(level) = parsed.as_int() {
            UpdateLevel::from_value(level)?;
        }
    }
    config.options.set(def, &parsed).await?;
    println!("{} {} to {}", "Set".green(), def.path().cyan(), parsed);

    if def.namespace == Namespace::Setting
        && def.key == general::SERVER_HOST
        && needs_server_warning(input)
    {
        println!(
            "{} {} is not an official server; some features may not work",
            "Warning:".yellow().bold(),
            input
        );
    }

    Ok(())
}
