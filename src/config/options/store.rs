//! Configuration stores and typed option access
//!
//! A [`ConfigStore`] only knows raw strings keyed by namespace and key. The
//! [`Options`] handle layers the registry on top: it parses stored values as
//! the declared type, falls back to defaults and type-checks writes.

use super::error::OptionError;
use super::registry::OptionsRegistry;
use super::types::{Namespace, OptionDefinition, OptionValue};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Namespaced key/value persistence
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Raw stored value, `None` when the key was never written
    async fn get_raw(&self, namespace: Namespace, key: &str) -> Result<Option<String>>;

    async fn set_raw(&self, namespace: Namespace, key: &str, value: &str) -> Result<()>;

    async fn delete(&self, namespace: Namespace, key: &str) -> Result<()>;
}

/// SQLite-backed store over the `options` table
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfigStore for SqliteStore {
    async fn get_raw(&self, namespace: Namespace, key: &str) -> Result<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT value FROM options WHERE namespace = ? AND key = ?")
            .bind(namespace.as_str())
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to get option '{}/{}' from database", namespace, key))
    }

    async fn set_raw(&self, namespace: Namespace, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO options (namespace, key, value, updated_at) VALUES (?, ?, ?, CURRENT_TIMESTAMP)
             ON CONFLICT(namespace, key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        )
        .bind(namespace.as_str())
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to set option '{}/{}' in database", namespace, key))?;

        log::debug!("Set option: {}/{}", namespace, key);
        Ok(())
    }

    async fn delete(&self, namespace: Namespace, key: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM options WHERE namespace = ? AND key = ?")
            .bind(namespace.as_str())
            .bind(key)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete option '{}/{}'", namespace, key))?;

        if result.rows_affected() > 0 {
            log::debug!("Deleted option: {}/{}", namespace, key);
        }
        Ok(())
    }
}

/// In-process store, used by tests and by hosts that persist elsewhere
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<(Namespace, String), String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn get_raw(&self, namespace: Namespace, key: &str) -> Result<Option<String>> {
        Ok(self
            .values
            .read()
            .await
            .get(&(namespace, key.to_string()))
            .cloned())
    }

    async fn set_raw(&self, namespace: Namespace, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .await
            .insert((namespace, key.to_string()), value.to_string());
        Ok(())
    }

    async fn delete(&self, namespace: Namespace, key: &str) -> Result<()> {
        self.values.write().await.remove(&(namespace, key.to_string()));
        Ok(())
    }
}

/// Typed access to options through a store
#[derive(Clone)]
pub struct Options {
    store: Arc<dyn ConfigStore>,
    registry: Arc<OptionsRegistry>,
}

impl Options {
    pub fn new(store: Arc<dyn ConfigStore>, registry: Arc<OptionsRegistry>) -> Self {
        Self { store, registry }
    }

    /// Options over a fresh in-memory store
    pub fn in_memory(registry: Arc<OptionsRegistry>) -> Self {
        Self::new(Arc::new(MemoryStore::new()), registry)
    }

    pub fn registry(&self) -> &OptionsRegistry {
        &self.registry
    }

    pub fn store(&self) -> &Arc<dyn ConfigStore> {
        &self.store
    }

    /// Get the stored value, or the default when it is missing or unparseable
    pub async fn get(&self, def: &OptionDefinition) -> Result<OptionValue> {
        let Some(raw) = self.store.get_raw(def.namespace, &def.key).await? else {
            return Ok(def.default.clone());
        };

        match def.ty.parse(&def.path(), &raw) {
            Ok(value) => Ok(value),
            Err(err) => {
                log::warn!("Ignoring stored value, using default: {}", err);
                Ok(def.default.clone())
            }
        }
    }

    /// Write a value; it must match the declared type
    pub async fn set(&self, def: &OptionDefinition, value: &OptionValue) -> Result<()> {
        def.check(value)?;
        self.store
            .set_raw(def.namespace, &def.key, &value.to_raw())
            .await
    }

    /// Parse user input as the declared type and write it
    pub async fn set_from_str(&self, def: &OptionDefinition, input: &str) -> Result<OptionValue> {
        let value = def.ty.parse(&def.path(), input)?;
        self.set(def, &value).await?;
        Ok(value)
    }

    /// Whether a value is stored for this option
    pub async fn is_stored(&self, def: &OptionDefinition) -> Result<bool> {
        Ok(self.store.get_raw(def.namespace, &def.key).await?.is_some())
    }

    /// Drop the stored value of a `setting` option so its default applies again
    pub async fn reset(&self, def: &OptionDefinition) -> Result<()> {
        if def.namespace != Namespace::Setting {
            anyhow::bail!("'{}' is application state and cannot be reset", def.path());
        }
        self.store.delete(def.namespace, &def.key).await
    }

    pub async fn get_key(&self, namespace: Namespace, key: &str) -> Result<OptionValue> {
        let def = self.registry.require(namespace, key)?;
        self.get(def).await
    }

    pub async fn set_key(&self, namespace: Namespace, key: &str, value: OptionValue) -> Result<()> {
        let def = self.registry.require(namespace, key)?;
        self.set(def, &value).await
    }

    pub async fn get_bool(&self, namespace: Namespace, key: &str) -> Result<bool> {
        let value = self.get_key(namespace, key).await?;
        value.as_bool().ok_or_else(|| mismatch(namespace, key, "bool", &value))
    }

    pub async fn get_int(&self, namespace: Namespace, key: &str) -> Result<i64> {
        let value = self.get_key(namespace, key).await?;
        value.as_int().ok_or_else(|| mismatch(namespace, key, "int", &value))
    }

    pub async fn get_text(&self, namespace: Namespace, key: &str) -> Result<String> {
        let value = self.get_key(namespace, key).await?;
        match value {
            OptionValue::Text(text) => Ok(text),
            other => Err(mismatch(namespace, key, "text", &other)),
        }
    }
}

fn mismatch(namespace: Namespace, key: &str, expected: &'static str, value: &OptionValue) -> anyhow::Error {
    OptionError::TypeMismatch {
        key: format!("{}/{}", namespace, key),
        expected,
        found: format!("{:?}", value),
    }
    .into()
}
