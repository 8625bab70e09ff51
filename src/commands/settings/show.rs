use crate::config::Config;
use crate::config::options::{Namespace, OptionDefinition, OptionValue};
use anyhow::Result;
use colored::Colorize;
use log::info;

/// Show every registered option with its effective value
pub async fn show_command(config: &Config) -> Result<()> {
    info!("Showing all options");

    let options = &config.options;
    for namespace in Namespace::ALL {
        println!("{}", format!("[{}]", namespace).bold());
        for def in options.registry().list_namespace(namespace) {
            let value = options.get(def).await?;
            let stored = options.is_stored(def).await?;
            let rendered = display_value(def, &value);

            let title = def
                .title
                .as_deref()
                .map(|t| format!("  {}", t.dimmed()))
                .unwrap_or_default();
            if stored {
                println!("  {} = {}{}", def.key.cyan(), rendered, title);
            } else {
                println!("  {} = {} {}{}", def.key.cyan(), rendered, "(default)".dimmed(), title);
            }
        }
        println!();
    }

    Ok(())
}

/// Render a value for the terminal; stored secrets are masked
pub(crate) fn display_value(def: &OptionDefinition, value: &OptionValue) -> String {
    match value {
        OptionValue::Text(text) if is_secret(def) && !text.is_empty() => "********".to_string(),
        OptionValue::Text(text) => format!("{:?}", text),
        other => other.to_string(),
    }
}

fn is_secret(def: &OptionDefinition) -> bool {
    def.namespace == Namespace::Persist && def.key.ends_with("_token")
}
