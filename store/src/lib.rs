//! Persistence boundary for role permission maps.
//!
//! One grant document is stored per role, keyed by role id. The
//! [`PermissionStore`] trait is the contract the rest of the subsystem
//! consumes; [`SqlitePermissionStore`] is the production implementation and
//! [`MemoryPermissionStore`] backs tests and embedded use.
//!
//! Storage failures surface as [`StoreError`] to the caller. The store never
//! retries internally; retry or backoff, if wanted, belongs to the embedding
//! application.

pub mod error;
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use authz::PermissionMap;
use tracing::info;

pub use error::{Result, StoreError};
pub use memory::MemoryPermissionStore;
pub use sqlite::SqlitePermissionStore;

/// Load/save contract for one role's grant map.
///
/// Implementable against any key-value or document store keyed by role id.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Fetches the persisted map for a role, `None` when the role has never
    /// been saved.
    async fn fetch_permission_map(&self, role_id: &str) -> Result<Option<PermissionMap>>;

    /// Writes the full map for a role, replacing any previous document.
    async fn persist_permission_map(&self, role_id: &str, map: &PermissionMap) -> Result<()>;

    /// Seeds a role with its catalog defaults on first access.
    ///
    /// When `fetch_permission_map` returns `None`, the default map is
    /// persisted exactly once before returning; otherwise this is a no-op.
    async fn ensure_seeded(&self, role_id: &str) -> Result<()> {
        if self.fetch_permission_map(role_id).await?.is_none() {
            info!(role_id, "seeding default permission map");
            let defaults = catalog::default_permission_map(role_id);
            self.persist_permission_map(role_id, &defaults).await?;
        }
        Ok(())
    }
}
