//! Fluent builder API for creating option definitions

use super::types::{Namespace, OptionDefinition, OptionType, OptionValue};
use anyhow::Result;

/// Builder for creating option definitions with a fluent API
pub struct OptionDefBuilder {
    namespace: Namespace,
    key: String,
    title: Option<String>,
    ty: Option<OptionType>,
    default: Option<OptionValue>,
}

impl OptionDefBuilder {
    /// Create a new builder for an option in a namespace
    pub fn new(namespace: Namespace, key: &str) -> Self {
        Self {
            namespace,
            key: key.to_string(),
            title: None,
            ty: None,
            default: None,
        }
    }

    /// Shorthand for `new(Namespace::Setting, key)`
    pub fn setting(key: &str) -> Self {
        Self::new(Namespace::Setting, key)
    }

    /// Shorthand for `new(Namespace::Persist, key)`
    pub fn persist(key: &str) -> Self {
        Self::new(Namespace::Persist, key)
    }

    /// Set the display title (untranslated message id)
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Define as a boolean type with default value
    pub fn bool_type(mut self, default: bool) -> Self {
        self.ty = Some(OptionType::Bool);
        self.default = Some(OptionValue::Bool(default));
        self
    }

    /// Define as an integer type with default value
    pub fn int_type(mut self, default: i64) -> Self {
        self.ty = Some(OptionType::Int);
        self.default = Some(OptionValue::Int(default));
        self
    }

    /// Define as a text type with default value
    pub fn text_type(mut self, default: &str) -> Self {
        self.ty = Some(OptionType::Text);
        self.default = Some(OptionValue::Text(default.to_string()));
        self
    }

    /// Build the option definition
    ///
    /// Returns an error if the key or type is missing
    pub fn build(self) -> Result<OptionDefinition> {
        if self.key.trim().is_empty() {
            anyhow::bail!("option key is required");
        }
        let ty = self
            .ty
            .ok_or_else(|| anyhow::anyhow!("type is required (use bool_type, int_type or text_type)"))?;
        let default = self
            .default
            .ok_or_else(|| anyhow::anyhow!("default value is required"))?;

        Ok(OptionDefinition {
            namespace: self.namespace,
            key: self.key,
            title: self.title,
            ty,
            default,
        })
    }
}
