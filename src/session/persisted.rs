//! Session provider whose state lives in the `persist` namespace

use super::provider::SessionProvider;
use crate::config::options::registrations::general;
use crate::config::options::{Namespace, OptionValue, Options};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Tokens handed out by a successful credential exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantedTokens {
    pub username: String,
    pub refresh_token: String,
    pub scopes: String,
    pub access_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Performs the actual credential exchange (browser flow, device code, ...)
#[async_trait]
pub trait TokenExchange: Send + Sync {
    async fn exchange(&self) -> Result<GrantedTokens, String>;
}

/// Exchange that returns tokens obtained out of band
#[derive(Debug, Clone)]
pub struct ProvidedTokens(pub GrantedTokens);

#[async_trait]
impl TokenExchange for ProvidedTokens {
    async fn exchange(&self) -> Result<GrantedTokens, String> {
        if self.0.refresh_token.trim().is_empty() {
            return Err("no refresh token was provided".to_string());
        }
        if self.0.username.trim().is_empty() {
            return Err("no username was provided".to_string());
        }
        Ok(self.0.clone())
    }
}

/// Session backed by the persisted OAuth entries
///
/// Logged in means a refresh token with granted scopes is stored. Logging out
/// forgets the tokens but keeps the last username.
pub struct PersistedSession {
    options: Options,
    exchange: Arc<dyn TokenExchange>,
}

impl PersistedSession {
    pub fn new(options: Options, exchange: Arc<dyn TokenExchange>) -> Self {
        Self { options, exchange }
    }

    async fn store_tokens(&self, tokens: &GrantedTokens) -> Result<()> {
        let expires = chrono::Utc::now().timestamp() + tokens.expires_in.max(0);
        let entries = [
            (general::OAUTH_REFRESH_TOKEN, OptionValue::Text(tokens.refresh_token.clone())),
            (general::OAUTH_REFRESH_TOKEN_SCOPES, OptionValue::Text(tokens.scopes.clone())),
            (general::OAUTH_ACCESS_TOKEN, OptionValue::Text(tokens.access_token.clone())),
            (general::OAUTH_ACCESS_TOKEN_EXPIRES, OptionValue::Int(expires)),
            (general::OAUTH_USERNAME, OptionValue::Text(tokens.username.clone())),
        ];
        for (key, value) in entries {
            self.options.set_key(Namespace::Persist, key, value).await?;
        }
        Ok(())
    }

    async fn forget_tokens(&self) -> Result<()> {
        let entries = [
            (general::OAUTH_REFRESH_TOKEN, OptionValue::Text(String::new())),
            (general::OAUTH_REFRESH_TOKEN_SCOPES, OptionValue::Text(String::new())),
            (general::OAUTH_ACCESS_TOKEN, OptionValue::Text(String::new())),
            (general::OAUTH_ACCESS_TOKEN_EXPIRES, OptionValue::Int(0)),
        ];
        for (key, value) in entries {
            self.options.set_key(Namespace::Persist, key, value).await?;
        }
        Ok(())
    }

    async fn has_refresh_token(&self) -> Result<bool> {
        let token = self
            .options
            .get_text(Namespace::Persist, general::OAUTH_REFRESH_TOKEN)
            .await?;
        let scopes = self
            .options
            .get_text(Namespace::Persist, general::OAUTH_REFRESH_TOKEN_SCOPES)
            .await?;
        Ok(!token.is_empty() && !scopes.is_empty())
    }
}

#[async_trait]
impl SessionProvider for PersistedSession {
    async fn is_logged_in(&self) -> bool {
        match self.has_refresh_token().await {
            Ok(logged_in) => logged_in,
            Err(e) => {
                log::error!("Failed to read session tokens: {:#}", e);
                false
            }
        }
    }

    async fn login(&self) -> Result<(), String> {
        let tokens = self.exchange.exchange().await?;
        self.store_tokens(&tokens)
            .await
            .map_err(|e| format!("could not store tokens: {}", e))?;
        log::info!("Logged in as {}", tokens.username);
        Ok(())
    }

    async fn logout(&self) {
        match self.forget_tokens().await {
            Ok(()) => log::info!("Logged out"),
            Err(e) => log::error!("Failed to forget session tokens: {:#}", e),
        }
    }
}
