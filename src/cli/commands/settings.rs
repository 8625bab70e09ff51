use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct SettingsCommands {
    #[command(subcommand)]
    pub command: SettingsSubcommands,
}

#[derive(Subcommand)]
pub enum SettingsSubcommands {
    /// Show all options of the General page
    Show,
    /// Get the value of an option
    Get {
        /// Option path, e.g. setting/server_host
        name: String,
    },
    /// Set the value of an option
    Set {
        /// Option path, e.g. setting/server_port
        name: String,
        /// New value, parsed as the option's type
        value: String,
    },
    /// Reset a setting to its default value
    Reset {
        /// Option path in the setting namespace
        name: String,
    },
    /// Restore all General page defaults; also logs out
    ResetAll {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Export the setting namespace as TOML
    Export {
        /// Destination file
        path: PathBuf,
    },
}
