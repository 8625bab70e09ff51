//! Registry of option definitions

use super::error::OptionError;
use super::types::{Namespace, OptionDefinition};
use anyhow::Result;
use std::collections::HashMap;

/// Ordered table of option definitions
///
/// Definitions are kept in declaration order so that load/save passes visit
/// them the same way every time. The registry is filled once at startup and
/// then shared read-only behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct OptionsRegistry {
    definitions: Vec<OptionDefinition>,
    index: HashMap<(Namespace, String), usize>,
}

impl OptionsRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new option definition
    ///
    /// Returns an error if the key is already registered in the same namespace
    pub fn register(&mut self, def: OptionDefinition) -> Result<()> {
        let slot = (def.namespace, def.key.clone());
        if self.index.contains_key(&slot) {
            return Err(OptionError::Duplicate {
                namespace: def.namespace,
                key: def.key,
            }
            .into());
        }
        log::debug!("Registered option: {}", def.path());
        self.index.insert(slot, self.definitions.len());
        self.definitions.push(def);
        Ok(())
    }

    /// Get option definition by namespace and key
    pub fn get(&self, namespace: Namespace, key: &str) -> Option<&OptionDefinition> {
        self.index
            .get(&(namespace, key.to_string()))
            .map(|&idx| &self.definitions[idx])
    }

    /// Like `get`, but a missing definition is an error
    pub fn require(&self, namespace: Namespace, key: &str) -> Result<&OptionDefinition, OptionError> {
        self.get(namespace, key).ok_or_else(|| OptionError::NotRegistered {
            namespace,
            key: key.to_string(),
        })
    }

    /// Look up a definition from its `namespace/key` path
    pub fn resolve(&self, path: &str) -> Result<&OptionDefinition> {
        let (ns, key) = path
            .split_once('/')
            .ok_or_else(|| anyhow::anyhow!("Expected 'namespace/key', got '{}'", path))?;
        let namespace = Namespace::parse(ns)
            .ok_or_else(|| anyhow::anyhow!("Unknown namespace '{}' (expected setting or persist)", ns))?;
        Ok(self.require(namespace, key)?)
    }

    /// Check if an option is registered
    pub fn contains(&self, namespace: Namespace, key: &str) -> bool {
        self.get(namespace, key).is_some()
    }

    /// All options in a namespace, in declaration order
    pub fn list_namespace(&self, namespace: Namespace) -> impl Iterator<Item = &OptionDefinition> {
        self.definitions
            .iter()
            .filter(move |def| def.namespace == namespace)
    }

    /// Get total number of registered options
    pub fn count(&self) -> usize {
        self.definitions.len()
    }
}
