use crate::commands::{general_page, plain_text};
use crate::config::Config;
use crate::config::options::registrations::general;
use crate::session::SessionStatus;
use anyhow::Result;
use colored::Colorize;
use log::info;

pub async fn status_command(config: &Config) -> Result<()> {
    info!("Executing auth status command");

    let mut page = general_page(config, None);
    page.load().await?;
    let state = page.state();

    println!("Session");
    println!("=======");
    println!("  Server: {}:{}", state.text(general::SERVER_HOST), state.int(general::SERVER_PORT));
    if state.server_warning_visible {
        println!(
            "  {} this is not an official server; login may not work",
            "Warning:".yellow().bold()
        );
    }

    match page.status() {
        SessionStatus::LoggedIn { .. } => {
            let text = state.display.logged_in_text.as_deref().unwrap_or_default();
            println!("  {} {}", "●".green(), plain_text(text));
        }
        _ => {
            println!("  {} Not logged in", "○".dimmed());
            println!("  Run 'tagger-options auth login' to log in.");
        }
    }

    Ok(())
}
