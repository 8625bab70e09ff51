use crate::commands::general_page;
use crate::config::Config;
use crate::page::{Msg, PageRuntime};
use anyhow::Result;
use colored::Colorize;
use log::info;

pub async fn logout_command(config: &Config) -> Result<()> {
    info!("Executing auth logout command");

    let mut runtime = PageRuntime::new(general_page(config, None));
    runtime.load().await?;
    runtime.dispatch(Msg::Logout);
    runtime.run_until_idle().await;

    println!("{} Logged out", "✓".green());
    Ok(())
}
