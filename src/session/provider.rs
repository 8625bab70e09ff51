use async_trait::async_trait;

/// External owner of the authenticated session
///
/// Implementations keep `persist/oauth_username` in sync with the session;
/// the options page reads the username from there.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn is_logged_in(&self) -> bool;

    /// Run the credential exchange; the error is a user-facing message
    async fn login(&self) -> Result<(), String>;

    /// Drop the session. Revocation problems are handled (and logged) here.
    async fn logout(&self);
}
