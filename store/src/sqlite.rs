//! SQLite-backed permission store.
//!
//! Each role's grants are stored as a single JSON document in the
//! `role_permissions` table, keyed by role id.

use async_trait::async_trait;
use authz::PermissionMap;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info};

use crate::error::Result;
use crate::PermissionStore;

/// Permission store over a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqlitePermissionStore {
    pool: SqlitePool,
}

impl SqlitePermissionStore {
    /// Opens (or creates) the database at `database_path` and ensures the
    /// `role_permissions` table exists.
    pub async fn new(database_path: &str) -> Result<Self> {
        // Ensure the data directory exists
        if let Some(parent) = Path::new(database_path).parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!("Connecting to permission database at: {}", database_path);

        // SQLite connection strings need to be in the format sqlite://path;
        // absolute paths use sqlite:///path.
        let connection_string =
            if database_path.starts_with("sqlite:") || database_path.starts_with(":memory:") {
                database_path.to_string()
            } else if database_path.starts_with('/') {
                format!("sqlite://{}", database_path)
            } else {
                format!("sqlite:{}", database_path)
            };

        debug!("Using connection string: {}", connection_string);

        let pool = SqlitePool::connect(&connection_string).await?;
        Self::with_pool(pool).await
    }

    /// Builds a store over an existing pool, creating the table if needed.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self> {
        let store = Self { pool };
        store.create_table().await?;
        Ok(store)
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// When a role's map was last persisted, `None` if never.
    ///
    /// Shown in the matrix UI next to the save button.
    pub async fn last_updated(&self, role_id: &str) -> Result<Option<DateTime<Utc>>> {
        let row: Option<(DateTime<Utc>,)> =
            sqlx::query_as("SELECT updated_at FROM role_permissions WHERE role_id = ?")
                .bind(role_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(updated_at,)| updated_at))
    }

    async fn create_table(&self) -> Result<()> {
        let query = r#"
            CREATE TABLE IF NOT EXISTS role_permissions (
                role_id TEXT PRIMARY KEY NOT NULL,
                grants TEXT NOT NULL,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
        "#;

        sqlx::query(query).execute(&self.pool).await?;

        debug!("role_permissions table created/verified");
        Ok(())
    }
}

#[async_trait]
impl PermissionStore for SqlitePermissionStore {
    async fn fetch_permission_map(&self, role_id: &str) -> Result<Option<PermissionMap>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT grants FROM role_permissions WHERE role_id = ?")
                .bind(role_id)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((document,)) => {
                let map: PermissionMap = serde_json::from_str(&document)?;
                debug!(role_id, resources = map.len(), "permission map loaded");
                Ok(Some(map))
            }
            None => {
                debug!(role_id, "no persisted permission map");
                Ok(None)
            }
        }
    }

    async fn persist_permission_map(&self, role_id: &str, map: &PermissionMap) -> Result<()> {
        let document = serde_json::to_string(map)?;

        sqlx::query(
            r#"
            INSERT INTO role_permissions (role_id, grants, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(role_id) DO UPDATE
            SET grants = excluded.grants, updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(role_id)
        .bind(&document)
        .execute(&self.pool)
        .await?;

        info!(role_id, "permission map persisted");
        Ok(())
    }
}
