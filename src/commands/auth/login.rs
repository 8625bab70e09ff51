use crate::commands::{general_page, plain_text};
use crate::config::Config;
use crate::page::{Msg, PageRuntime};
use crate::session::{GrantedTokens, ProvidedTokens, SessionStatus};
use anyhow::Result;
use colored::Colorize;
use log::{error, info};
use std::sync::Arc;

pub struct LoginOptions {
    pub username: String,
    pub refresh_token: String,
    pub scopes: String,
    pub access_token: String,
    pub expires_in: i64,
}

/// Log in through the page's login flow using tokens obtained out of band
pub async fn login_command(config: &Config, options: LoginOptions) -> Result<()> {
    info!("Executing auth login command for {}", options.username);

    let exchange = ProvidedTokens(GrantedTokens {
        username: options.username,
        refresh_token: options.refresh_token,
        scopes: options.scopes,
        access_token: options.access_token,
        expires_in: options.expires_in,
    });

    let mut runtime = PageRuntime::new(general_page(config, Some(Arc::new(exchange))));
    runtime.load().await?;
    if let SessionStatus::LoggedIn { username } = runtime.page().status() {
        println!("Already logged in as {}. Run 'tagger-options auth logout' first.", username.bold());
        return Ok(());
    }

    runtime.dispatch(Msg::Login);
    runtime.run_until_idle().await;

    let page = runtime.page();
    match page.status() {
        SessionStatus::LoggedIn { .. } => {
            let text = page.state().display.logged_in_text.as_deref().unwrap_or_default();
            println!("{} {}", "✓".green(), plain_text(text));
            Ok(())
        }
        SessionStatus::LoginFailed { message } => {
            error!("Login failed: {}", message);
            let text = page.state().display.login_error_text.as_deref().unwrap_or_default();
            println!("{} {}", "✗".red(), text);
            anyhow::bail!("login failed: {}", message)
        }
        other => anyhow::bail!("login did not complete (status: {:?})", other),
    }
}
