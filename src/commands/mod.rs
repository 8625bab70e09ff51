//! Command handlers for the `tagger-options` binary

pub mod auth;
pub mod settings;

use crate::config::Config;
use crate::page::{GeneralOptionsPage, Untranslated};
use crate::session::{GrantedTokens, PersistedSession, TokenExchange};
use crate::update::BuildUpdateCapability;
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Open the configuration database, honoring `--db`
pub async fn open_config(db: Option<&Path>) -> Result<Config> {
    match db {
        Some(path) => Config::open(path).await,
        None => Config::load().await,
    }
}

/// Exchange used when no tokens were handed to the command
struct NoExchange;

#[async_trait]
impl TokenExchange for NoExchange {
    async fn exchange(&self) -> Result<GrantedTokens, String> {
        Err("no credentials were supplied".to_string())
    }
}

/// General page wired to the stored session
pub fn general_page(config: &Config, exchange: Option<Arc<dyn TokenExchange>>) -> GeneralOptionsPage {
    let exchange = exchange.unwrap_or_else(|| Arc::new(NoExchange));
    let session = PersistedSession::new(config.options.clone(), exchange);
    GeneralOptionsPage::new(
        config.options.clone(),
        Arc::new(session),
        Arc::new(BuildUpdateCapability),
        Arc::new(Untranslated),
    )
}

/// Drop the markup used in status texts for terminal output
pub(crate) fn plain_text(markup: &str) -> String {
    markup.replace("<b>", "").replace("</b>", "")
}
