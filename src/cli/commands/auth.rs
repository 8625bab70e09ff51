use clap::{Args, Subcommand};

#[derive(Args)]
pub struct AuthCommands {
    #[command(subcommand)]
    pub command: AuthSubcommands,
}

#[derive(Subcommand)]
pub enum AuthSubcommands {
    /// Show login status and server information
    Status,
    /// Log in with tokens obtained from the authorization server
    Login {
        /// Account name the tokens belong to
        #[arg(long)]
        username: String,
        /// OAuth refresh token
        #[arg(long)]
        refresh_token: String,
        /// Granted scopes, space separated
        #[arg(long, default_value = "profile tag rating collection submit_isrc submit_barcode")]
        scopes: String,
        /// OAuth access token
        #[arg(long, default_value = "")]
        access_token: String,
        /// Access token lifetime in seconds
        #[arg(long, default_value_t = 3600)]
        expires_in: i64,
    },
    /// Forget the stored tokens
    Logout,
}
