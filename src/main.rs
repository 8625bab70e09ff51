use anyhow::Result;
use clap::Parser;
use log::info;

use tagger_options::cli::Cli;
use tagger_options::cli::app::Commands;
use tagger_options::cli::commands::{AuthSubcommands, SettingsSubcommands};
use tagger_options::commands::auth::{LoginOptions, login_command, logout_command, status_command};
use tagger_options::commands::open_config;
use tagger_options::commands::settings::{
    export_command, get_command, reset_all_command, reset_command, set_command, show_command,
};
use tagger_options::config::Config;
use tagger_options::update::current_version;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger to file (truncate on each run)
    let log_dir = match cli.db.as_deref().and_then(|db| db.parent()) {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => Config::config_dir()?,
    };
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_dir.join("tagger-options.log"))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    info!("Starting tagger-options {}", current_version());

    let config = open_config(cli.db.as_deref()).await?;

    let result = match cli.command {
        Commands::Settings(settings) => match settings.command {
            SettingsSubcommands::Show => show_command(&config).await,
            SettingsSubcommands::Get { name } => get_command(&config, &name).await,
            SettingsSubcommands::Set { name, value } => set_command(&config, &name, &value).await,
            SettingsSubcommands::Reset { name } => reset_command(&config, &name).await,
            SettingsSubcommands::ResetAll { force } => reset_all_command(&config, force).await,
            SettingsSubcommands::Export { path } => export_command(&config, &path).await,
        },
        Commands::Auth(auth) => match auth.command {
            AuthSubcommands::Status => status_command(&config).await,
            AuthSubcommands::Login {
                username,
                refresh_token,
                scopes,
                access_token,
                expires_in,
            } => {
                let options = LoginOptions {
                    username,
                    refresh_token,
                    scopes,
                    access_token,
                    expires_in,
                };
                login_command(&config, options).await
            }
            AuthSubcommands::Logout => logout_command(&config).await,
        },
    };

    config.close().await;
    result
}
