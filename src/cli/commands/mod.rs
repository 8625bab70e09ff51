pub mod auth;
pub mod settings;

pub use auth::{AuthCommands, AuthSubcommands};
pub use settings::{SettingsCommands, SettingsSubcommands};
