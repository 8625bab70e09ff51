//! TOML export of user settings for backup and debugging

use crate::config::options::{Namespace, OptionValue, Options};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Shape of the exported document
#[derive(Debug, Default, Serialize)]
pub struct ExportConfig {
    pub setting: BTreeMap<String, toml::Value>,
}

/// Collect effective `setting` values (stored or default)
///
/// `persist` entries are left out on purpose: they hold session tokens.
pub async fn collect_settings(options: &Options) -> Result<ExportConfig> {
    let mut config = ExportConfig::default();

    for def in options.registry().list_namespace(Namespace::Setting) {
        let value = match options.get(def).await? {
            OptionValue::Bool(v) => toml::Value::Boolean(v),
            OptionValue::Int(v) => toml::Value::Integer(v),
            OptionValue::Text(v) => toml::Value::String(v),
        };
        config.setting.insert(def.key.clone(), value);
    }

    Ok(config)
}

/// Render effective settings as a TOML document
pub async fn settings_to_toml(options: &Options) -> Result<String> {
    let config = collect_settings(options).await?;
    toml::to_string_pretty(&config).context("Failed to serialize settings to TOML")
}

/// Write effective settings to a TOML file
pub async fn export_settings_toml(options: &Options, path: &Path) -> Result<()> {
    log::info!("Exporting settings to TOML: {:?}", path);

    let content = settings_to_toml(options).await?;
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write TOML file: {:?}", path))?;

    Ok(())
}
