//! Pending-edit draft of one role's permission map.

use authz::{AccessLevel, Action, Grant, PermissionMap};
use store::{PermissionStore, Result};
use tracing::debug;

use crate::PermissionService;

/// A role's map under edit: the last saved copy plus a pending copy.
///
/// Toggles mutate only the pending copy, routed through the engine's
/// cascade normalization. The dirty flag is derived at read time by
/// comparing pending against saved, so it can never go stale; it clears
/// only after a save the store confirmed.
#[derive(Debug, Clone)]
pub struct PermissionDraft {
    role_id: String,
    is_system: bool,
    saved: PermissionMap,
    pending: PermissionMap,
}

impl PermissionDraft {
    pub(crate) fn new(role_id: &str, is_system: bool, saved: PermissionMap) -> Self {
        Self {
            role_id: role_id.to_string(),
            is_system,
            pending: saved.clone(),
            saved,
        }
    }

    pub fn role_id(&self) -> &str {
        &self.role_id
    }

    /// `true` when this draft edits the system role; every toggle is then a
    /// no-op.
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    /// The map as the user currently sees it.
    pub fn pending(&self) -> &PermissionMap {
        &self.pending
    }

    /// Applies one checkbox toggle with cascade normalization.
    pub fn toggle(&mut self, resource_id: &str, action: Action, value: bool) {
        self.pending =
            authz::normalize_toggle(&self.pending, resource_id, action, value, self.is_system);
    }

    /// Whether the pending map differs from the last saved one.
    pub fn is_dirty(&self) -> bool {
        self.pending != self.saved
    }

    /// Abandons pending changes, reverting to the last saved map.
    pub fn discard(&mut self) {
        debug!(role_id = %self.role_id, "pending permission changes discarded");
        self.pending = self.saved.clone();
    }

    /// The pending grant for one resource, all-`false` when absent.
    pub fn grants_of(&self, resource_id: &str) -> Grant {
        authz::grants_of(&self.pending, resource_id)
    }

    /// Classification of the pending map, for live display while editing.
    pub fn access_level(&self) -> AccessLevel {
        authz::classify_access_level(&self.pending, catalog::resources())
    }

    /// Persists the pending map through the service.
    ///
    /// The saved copy (and with it the dirty flag) is updated only after
    /// the store confirmed the write; a failed persist leaves the draft
    /// dirty so the UI can offer a retry.
    pub async fn save<S: PermissionStore>(&mut self, service: &PermissionService<S>) -> Result<()> {
        service.save(&self.role_id, &self.pending).await?;
        self.saved = self.pending.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CacheConfig;
    use store::MemoryPermissionStore;

    async fn hr_draft(service: &PermissionService<MemoryPermissionStore>) -> PermissionDraft {
        service.edit("hr").await.unwrap()
    }

    fn test_service() -> PermissionService<MemoryPermissionStore> {
        PermissionService::new(MemoryPermissionStore::new(), CacheConfig::default())
    }

    #[tokio::test]
    async fn test_draft_starts_clean() {
        let service = test_service();
        let draft = hr_draft(&service).await;
        assert!(!draft.is_dirty());
        assert_eq!(draft.pending(), &catalog::default_permission_map("hr"));
    }

    #[tokio::test]
    async fn test_toggle_marks_dirty_and_cascades() {
        let service = test_service();
        let mut draft = hr_draft(&service).await;

        draft.toggle("fleet", Action::Update, true);
        assert!(draft.is_dirty());
        assert_eq!(draft.grants_of("fleet"), Grant::READ_UPDATE);

        // Toggling back to the saved state clears the derived dirty flag.
        draft.toggle("fleet", Action::Update, false);
        draft.toggle("fleet", Action::Read, false);
        assert!(!draft.is_dirty());
    }

    #[tokio::test]
    async fn test_save_clears_dirty_and_persists() {
        let service = test_service();
        let mut draft = hr_draft(&service).await;

        draft.toggle("fleet", Action::Delete, true);
        draft.save(&service).await.unwrap();
        assert!(!draft.is_dirty());

        let persisted = service
            .store()
            .fetch_permission_map("hr")
            .await
            .unwrap()
            .unwrap();
        assert!(authz::can(&persisted, "fleet", Action::Delete));
        assert!(authz::can(&persisted, "fleet", Action::Read));
    }

    #[tokio::test]
    async fn test_discard_reverts_to_saved() {
        let service = test_service();
        let mut draft = hr_draft(&service).await;

        draft.toggle("news", Action::Delete, true);
        assert!(draft.is_dirty());

        draft.discard();
        assert!(!draft.is_dirty());
        assert_eq!(draft.pending(), &catalog::default_permission_map("hr"));
    }

    #[tokio::test]
    async fn test_system_role_draft_ignores_toggles() {
        let service = test_service();
        let mut draft = service.edit("admin").await.unwrap();
        assert!(draft.is_system());

        draft.toggle("employees", Action::Read, false);
        assert!(!draft.is_dirty());
        assert!(draft.grants_of("employees").read);
    }
}
