//! In-memory permission store for tests and embedded use.

use async_trait::async_trait;
use authz::PermissionMap;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

use crate::error::Result;
use crate::PermissionStore;

/// Process-local store keyed by role id. Contents die with the process.
#[derive(Debug, Default)]
pub struct MemoryPermissionStore {
    maps: Mutex<HashMap<String, PermissionMap>>,
}

impl MemoryPermissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn maps(&self) -> std::sync::MutexGuard<'_, HashMap<String, PermissionMap>> {
        self.maps
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl PermissionStore for MemoryPermissionStore {
    async fn fetch_permission_map(&self, role_id: &str) -> Result<Option<PermissionMap>> {
        Ok(self.maps().get(role_id).cloned())
    }

    async fn persist_permission_map(&self, role_id: &str, map: &PermissionMap) -> Result<()> {
        debug!(role_id, "permission map persisted in memory");
        self.maps().insert(role_id.to_string(), map.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authz::Grant;

    #[tokio::test]
    async fn test_memory_roundtrip() {
        let store = MemoryPermissionStore::new();
        assert!(store.fetch_permission_map("hr").await.unwrap().is_none());

        let mut map = PermissionMap::new();
        map.insert("employees".to_string(), Grant::READ);
        store.persist_permission_map("hr", &map).await.unwrap();

        let fetched = store.fetch_permission_map("hr").await.unwrap().unwrap();
        assert_eq!(fetched, map);
    }
}
