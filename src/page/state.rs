use super::display::DisplayState;
use crate::config::options::OptionValue;
use crate::config::options::registrations::general;
use crate::constants::is_official_server;
use std::collections::HashMap;

/// Whether the "not an official server" warning applies to `host`
pub fn needs_server_warning(host: &str) -> bool {
    let host = host.trim();
    host.is_empty() || !is_official_server(host)
}

/// The two "process new files" switches; never both on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoProcessing {
    pub analyze: bool,
    pub cluster: bool,
}

impl AutoProcessing {
    pub fn with_analyze(self, analyze: bool) -> Self {
        Self {
            analyze,
            cluster: self.cluster && !analyze,
        }
    }

    pub fn with_cluster(self, cluster: bool) -> Self {
        Self {
            analyze: self.analyze && !cluster,
            cluster,
        }
    }
}

/// One entry of the update level selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelChoice {
    pub value: i64,
    pub label: String,
}

/// Everything the General page shows
#[derive(Debug, Clone, Default)]
pub struct PageState {
    /// Bound `setting` values by key
    pub values: HashMap<String, OptionValue>,
    pub update_level_choices: Vec<LevelChoice>,
    pub server_warning_visible: bool,
    pub update_group_visible: bool,
    pub display: DisplayState,
}

impl PageState {
    pub fn value(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    pub fn flag(&self, key: &str) -> bool {
        self.value(key).and_then(OptionValue::as_bool).unwrap_or(false)
    }

    pub fn int(&self, key: &str) -> i64 {
        self.value(key).and_then(OptionValue::as_int).unwrap_or(0)
    }

    pub fn text(&self, key: &str) -> &str {
        self.value(key).and_then(OptionValue::as_text).unwrap_or("")
    }

    pub fn selected_update_level(&self) -> i64 {
        self.int(general::UPDATE_LEVEL)
    }

    /// Label of the selected update level, as shown in the selector
    pub fn selected_update_level_label(&self) -> Option<&str> {
        let selected = self.selected_update_level();
        self.update_level_choices
            .iter()
            .find(|choice| choice.value == selected)
            .map(|choice| choice.label.as_str())
    }
}
