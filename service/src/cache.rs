//! TTL'd in-memory cache of loaded permission maps.
//!
//! An explicit cache object with a defined TTL and invalidation triggers,
//! injected into [`crate::PermissionService`]. Entries are process-local
//! and die with the process; the store stays the source of truth.

use authz::PermissionMap;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Cache configuration.
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// Entry time-to-live in seconds. Zero means entries expire
    /// immediately; a negative value disables expiry.
    pub ttl_seconds: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_seconds: 300 }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    map: PermissionMap,
    cached_at: DateTime<Utc>,
}

/// Per-role permission map cache.
pub struct GrantCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl_seconds: i64,
}

impl GrantCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl_seconds: config.ttl_seconds,
        }
    }

    /// Returns the cached map for a role, `None` on miss or expiry.
    pub async fn get(&self, role_id: &str) -> Option<PermissionMap> {
        let entries = self.entries.read().await;
        let entry = entries.get(role_id)?;

        let age_seconds = (Utc::now() - entry.cached_at).num_seconds();
        // TTL of 0 means expired immediately, positive TTL means check against age
        if self.ttl_seconds == 0 || (self.ttl_seconds > 0 && age_seconds > self.ttl_seconds) {
            debug!(role_id, age_seconds, "cache entry expired");
            return None;
        }

        debug!(role_id, age_seconds, "cache hit");
        Some(entry.map.clone())
    }

    /// Stores a freshly loaded or freshly persisted map.
    pub async fn put(&self, role_id: &str, map: PermissionMap) {
        let mut entries = self.entries.write().await;
        entries.insert(
            role_id.to_string(),
            CacheEntry {
                map,
                cached_at: Utc::now(),
            },
        );
        debug!(role_id, "cache entry stored");
    }

    /// Drops one role's entry. Returns `true` if an entry existed.
    pub async fn invalidate(&self, role_id: &str) -> bool {
        let mut entries = self.entries.write().await;
        let existed = entries.remove(role_id).is_some();
        debug!(role_id, existed, "cache entry invalidated");
        existed
    }

    /// Drops every entry. Returns the number removed.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let count = entries.len();
        entries.clear();
        debug!(count, "cache cleared");
        count
    }
}
