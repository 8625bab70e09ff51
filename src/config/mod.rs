//! SQLite-based configuration module
//!
//! This module provides persistent storage for:
//! - User settings (`setting` namespace)
//! - Application state such as session tokens (`persist` namespace)
//! - Schema migrations for the backing database

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod compat;
pub mod db;
pub mod migrations;
pub mod options;

/// Main configuration handle using a SQLite backend
pub struct Config {
    pub(crate) pool: sqlx::SqlitePool,
    config_path: PathBuf,

    /// Typed option access
    pub options: options::Options,
}

impl Config {
    /// Directory holding the database and the log file
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("tagger-options")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".tagger-options")
        };

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            log::info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir)
    }

    /// Get the path to the SQLite database file
    pub fn get_db_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.db"))
    }

    /// Load configuration from the default database location
    pub async fn load() -> Result<Self> {
        let db_path = Self::get_db_path()?;
        Self::open(&db_path).await
    }

    /// Load configuration from an explicit database file
    pub async fn open(db_path: &Path) -> Result<Self> {
        log::debug!("Loading config from: {:?}", db_path);

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let pool = db::connect(db_path).await?;
        db::run_migrations(&pool).await?;

        Self::from_pool(pool, db_path.to_path_buf())
    }

    /// Create a new config for testing (in-memory database)
    pub async fn new_test() -> Result<Self> {
        let pool = db::connect_memory().await?;
        db::run_migrations(&pool).await?;

        Self::from_pool(pool, PathBuf::from(":memory:"))
    }

    fn from_pool(pool: sqlx::SqlitePool, config_path: PathBuf) -> Result<Self> {
        let registry = options::registrations::build_registry()?;
        let store = Arc::new(options::SqliteStore::new(pool.clone()));
        let options = options::Options::new(store, registry);

        Ok(Self {
            pool,
            config_path,
            options,
        })
    }

    /// Path of the backing database file
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Flush and close the database
    pub async fn close(self) {
        self.pool.close().await;
    }
}
