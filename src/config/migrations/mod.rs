//! Schema migrations for the configuration database
//!
//! Each `files/NNN_name/up.sql` is applied once, in version order, inside its
//! own transaction. The checksum of every applied script is recorded so an
//! edited script is caught on the next start instead of silently diverging.

use anyhow::{Context, Result};
use include_dir::{Dir, include_dir};
use log::{debug, info};
use sqlx::SqlitePool;
use std::collections::BTreeMap;

static MIGRATIONS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/config/migrations/files");

#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    pub sql: String,
}

/// Embedded migrations keyed by version
pub fn load_migrations() -> Result<BTreeMap<i64, Migration>> {
    let mut migrations = BTreeMap::new();

    for entry in MIGRATIONS_DIR.dirs() {
        let dir_name = entry
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .context("Invalid migration directory name")?;

        let (version, name) = dir_name
            .split_once('_')
            .with_context(|| format!("Expected NNN_name, got migration directory '{}'", dir_name))?;
        let version: i64 = version
            .parse()
            .with_context(|| format!("Invalid migration version in '{}'", dir_name))?;

        let sql = MIGRATIONS_DIR
            .get_file(format!("{}/up.sql", dir_name))
            .and_then(|f| f.contents_utf8())
            .with_context(|| format!("Migration '{}' has no readable up.sql", dir_name))?;

        migrations.insert(
            version,
            Migration {
                version,
                name: name.to_string(),
                sql: sql.to_string(),
            },
        );
    }

    if migrations.is_empty() {
        anyhow::bail!("No migrations embedded");
    }
    Ok(migrations)
}

/// Line endings are normalized so checkouts on any platform agree
pub fn calculate_checksum(sql: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    sql.replace("\r\n", "\n").hash(&mut hasher);
    format!("{:x}", hasher.finish())
}

/// Apply every migration not yet recorded in `schema_migrations`
pub async fn migrate_up(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            checksum TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create schema_migrations table")?;

    let applied: BTreeMap<i64, String> =
        sqlx::query_as::<_, (i64, String)>("SELECT version, checksum FROM schema_migrations")
            .fetch_all(pool)
            .await
            .context("Failed to read applied migrations")?
            .into_iter()
            .collect();

    let available = load_migrations()?;

    for (version, checksum) in &applied {
        let migration = available
            .get(version)
            .with_context(|| format!("Applied migration {} is not embedded in this build", version))?;
        if *checksum != calculate_checksum(&migration.sql) {
            anyhow::bail!(
                "Migration {} '{}' was modified after being applied",
                version,
                migration.name
            );
        }
    }

    let pending: Vec<&Migration> = available
        .values()
        .filter(|m| !applied.contains_key(&m.version))
        .collect();
    if pending.is_empty() {
        debug!("Schema is up to date");
        return Ok(());
    }

    for migration in pending {
        info!("Applying migration {} '{}'", migration.version, migration.name);
        let mut tx = pool.begin().await.context("Failed to start migration transaction")?;

        sqlx::raw_sql(&migration.sql)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to execute migration {}", migration.version))?;
        sqlx::query("INSERT INTO schema_migrations (version, name, checksum) VALUES (?, ?, ?)")
            .bind(migration.version)
            .bind(&migration.name)
            .bind(calculate_checksum(&migration.sql))
            .execute(&mut *tx)
            .await
            .context("Failed to record migration")?;

        tx.commit().await.context("Failed to commit migration")?;
    }
    Ok(())
}
