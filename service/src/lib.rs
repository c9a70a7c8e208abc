//! Permission subsystem facade for the HR intranet.
//!
//! Composes the static catalogs, the authorization engine, and a
//! [`PermissionStore`] behind one service the application consumes:
//!
//! - pages and route handlers ask [`PermissionService::can`] before
//!   rendering an affordance or permitting an operation
//! - the permission editor obtains a [`PermissionDraft`], toggles cells,
//!   and saves explicitly
//!
//! Loaded maps are held in a TTL'd [`GrantCache`] so that pervasive `can`
//! checks do not hit the store on every page render. The cache entry for a
//! role is refreshed right after each confirmed save, never before.

pub mod cache;
pub mod draft;

use authz::{AccessLevel, Action, PermissionMap};
use store::{PermissionStore, Result};
use tracing::info;

pub use cache::{CacheConfig, GrantCache};
pub use draft::PermissionDraft;

/// Facade over one permission store plus a read cache.
pub struct PermissionService<S: PermissionStore> {
    store: S,
    cache: GrantCache,
}

impl<S: PermissionStore> PermissionService<S> {
    pub fn new(store: S, cache_config: CacheConfig) -> Self {
        info!("Permission service initialized");
        Self {
            store,
            cache: GrantCache::new(cache_config),
        }
    }

    /// Get a reference to the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads a role's permission map, seeding defaults on first access.
    ///
    /// Cache hits skip the store entirely. On a miss the role is seeded if
    /// absent, fetched, cached and returned.
    pub async fn load(&self, role_id: &str) -> Result<PermissionMap> {
        if let Some(map) = self.cache.get(role_id).await {
            return Ok(map);
        }

        self.store.ensure_seeded(role_id).await?;
        let map = self
            .store
            .fetch_permission_map(role_id)
            .await?
            // A concurrent wipe between seed and fetch reads as empty
            // defaults rather than an error.
            .unwrap_or_else(|| catalog::default_permission_map(role_id));

        self.cache.put(role_id, map.clone()).await;
        Ok(map)
    }

    /// Persists a full map for a role and refreshes the cache.
    ///
    /// The cache is touched only after the store confirmed the write, so a
    /// failed persist leaves readers on the last saved state.
    pub async fn save(&self, role_id: &str, map: &PermissionMap) -> Result<()> {
        self.store.persist_permission_map(role_id, map).await?;
        self.cache.put(role_id, map.clone()).await;
        Ok(())
    }

    /// Point permission query for one role.
    pub async fn can(&self, role_id: &str, resource_id: &str, action: Action) -> Result<bool> {
        let map = self.load(role_id).await?;
        Ok(authz::can(&map, resource_id, action))
    }

    /// Aggregate access classification for one role.
    pub async fn access_level(&self, role_id: &str) -> Result<AccessLevel> {
        let map = self.load(role_id).await?;
        Ok(authz::classify_access_level(&map, catalog::resources()))
    }

    /// Opens an edit draft over the role's current map.
    pub async fn edit(&self, role_id: &str) -> Result<PermissionDraft> {
        let saved = self.load(role_id).await?;
        let is_system = catalog::find_role(role_id).is_some_and(|role| role.is_system);
        Ok(PermissionDraft::new(role_id, is_system, saved))
    }

    /// Drops the cached entry for a role, forcing the next read through the
    /// store.
    pub async fn invalidate(&self, role_id: &str) -> bool {
        self.cache.invalidate(role_id).await
    }
}
