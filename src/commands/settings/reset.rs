use crate::commands::general_page;
use crate::config::Config;
use crate::page::PageRuntime;
use crate::ui::prompts::prompt_confirmation;
use anyhow::Result;
use colored::Colorize;
use log::info;

/// Reset one setting to its default value
pub async fn reset_command(config: &Config, name: &str) -> Result<()> {
    info!("Resetting option: {}", name);

    let def = config.options.registry().resolve(name)?;
    config.options.reset(def).await?;
    println!("Reset {} to {}", def.path().cyan(), def.default);

    Ok(())
}

/// Restore the defaults of the General page and save them
///
/// Like the page's "restore defaults" button this also logs out. Application
/// state such as the last username is kept.
pub async fn reset_all_command(config: &Config, force: bool) -> Result<()> {
    info!("Resetting all settings to defaults");

    if !force && !prompt_confirmation("Reset all settings to their default values and log out?", false)? {
        println!("Operation cancelled.");
        return Ok(());
    }

    let mut runtime = PageRuntime::new(general_page(config, None));
    runtime.load().await?;
    runtime.restore_defaults();
    runtime.save().await?;
    runtime.run_until_idle().await;

    println!("{}", "All settings have been reset to default values.".green());
    Ok(())
}
