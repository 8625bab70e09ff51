use super::commands::{AuthCommands, SettingsCommands};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tagger-options")]
#[command(about = "Inspect and edit the General options of the tagger")]
#[command(version)]
pub struct Cli {
    /// Use this database instead of the one in the config directory
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Application settings management
    Settings(SettingsCommands),
    /// Login session management
    Auth(AuthCommands),
}
