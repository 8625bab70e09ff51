use super::show::display_value;
use crate::config::Config;
use anyhow::Result;
use log::info;

/// Get the value of one option, e.g. `setting/server_host`
pub async fn get_command(config: &Config, name: &str) -> Result<()> {
    info!("Getting option: {}", name);

    let def = config.options.registry().resolve(name)?;
    let value = config.options.get(def).await?;
    println!("{}", display_value(def, &value));

    Ok(())
}
