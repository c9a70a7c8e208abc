//! Pure decision functions over a role's permission map.
//!
//! The engine holds no state and performs no I/O. Callers hold a pending
//! copy of a role's [`PermissionMap`], route every user toggle through
//! [`normalize_toggle`], and diff the result against the last saved map to
//! derive their dirty flag.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Action, Grant, PermissionMap, Resource};

/// Aggregate classification of a role's access breadth.
///
/// Ordered from least to most access, so classifications of grant-superset
/// maps compare as `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    NoAccess,
    Limited,
    Partial,
    Full,
}

impl AccessLevel {
    /// French display label shown next to each role in the matrix UI.
    pub fn label(&self) -> &'static str {
        match self {
            AccessLevel::NoAccess => "Aucun accès",
            AccessLevel::Limited => "Accès limité",
            AccessLevel::Partial => "Accès partiel",
            AccessLevel::Full => "Accès complet",
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Applies one grant toggle and normalizes the result.
///
/// Returns a new map; the input is never mutated, so callers can diff the
/// result against a previously saved map. A resource id absent from the map
/// is inserted at all-`false` before the toggle applies.
///
/// Two rules keep every returned map consistent:
///
/// - disabling `read` also disables `create`, `update` and `delete`
/// - enabling any of `create`/`update`/`delete` also enables `read`
///
/// When `is_system_role` is true the map is returned unchanged, whatever the
/// caller supplies. The editor UI never renders toggles for the system role,
/// but the rule is enforced here so every caller is covered.
///
/// Applying the same toggle twice yields the same map as applying it once.
pub fn normalize_toggle(
    map: &PermissionMap,
    resource_id: &str,
    action: Action,
    new_value: bool,
    is_system_role: bool,
) -> PermissionMap {
    if is_system_role {
        debug!(
            resource_id,
            action = %action,
            "toggle ignored: system role grants are immutable"
        );
        return map.clone();
    }

    let mut next = map.clone();
    let grant = next.entry(resource_id.to_string()).or_insert(Grant::NONE);
    grant.set(action, new_value);

    match (action, new_value) {
        (Action::Read, false) => {
            grant.create = false;
            grant.update = false;
            grant.delete = false;
        }
        (Action::Create | Action::Update | Action::Delete, true) => {
            grant.read = true;
        }
        _ => {}
    }

    next
}

/// Classifies a role's overall access as a fraction of granted slots.
///
/// A slot is one (resource, action) pair where the action is in that
/// resource's `allowed_actions`; grants outside the allowed set never count.
/// Thresholds: `>= 0.9` is Full, `>= 0.5` is Partial, anything above zero is
/// Limited, zero is NoAccess. An empty catalog classifies as NoAccess.
pub fn classify_access_level(map: &PermissionMap, resources: &[Resource]) -> AccessLevel {
    let mut slots = 0usize;
    let mut granted = 0usize;

    for resource in resources {
        let grant = grants_of(map, resource.id);
        for &action in resource.allowed_actions {
            slots += 1;
            if grant.get(action) {
                granted += 1;
            }
        }
    }

    if slots == 0 || granted == 0 {
        return AccessLevel::NoAccess;
    }

    let ratio = granted as f64 / slots as f64;
    if ratio >= 0.9 {
        AccessLevel::Full
    } else if ratio >= 0.5 {
        AccessLevel::Partial
    } else {
        AccessLevel::Limited
    }
}

/// Point permission query used by pages and route handlers.
///
/// Returns `false` for any resource absent from the map rather than
/// erroring; this path gates UI affordances and must never crash an
/// unrelated page.
pub fn can(map: &PermissionMap, resource_id: &str, action: Action) -> bool {
    map.get(resource_id).is_some_and(|grant| grant.get(action))
}

/// Returns the full grant for one resource, all-`false` when absent.
pub fn grants_of(map: &PermissionMap, resource_id: &str) -> Grant {
    map.get(resource_id).copied().unwrap_or(Grant::NONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const CRUD: &[Action] = &[Action::Read, Action::Create, Action::Update, Action::Delete];

    /// Ten applicable slots: 4 + 4 + 2.
    fn ten_slot_catalog() -> Vec<Resource> {
        vec![
            Resource {
                id: "employees",
                label: "Employés",
                allowed_actions: CRUD,
            },
            Resource {
                id: "missions",
                label: "Missions",
                allowed_actions: CRUD,
            },
            Resource {
                id: "settings",
                label: "Paramètres",
                allowed_actions: &[Action::Read, Action::Update],
            },
        ]
    }

    /// Grants the first `n` slots in catalog order.
    fn map_with_granted_slots(resources: &[Resource], n: usize) -> PermissionMap {
        let mut map = PermissionMap::new();
        let mut remaining = n;
        for resource in resources {
            let mut grant = Grant::NONE;
            for &action in resource.allowed_actions {
                if remaining == 0 {
                    break;
                }
                grant.set(action, true);
                remaining -= 1;
            }
            map.insert(resource.id.to_string(), grant);
        }
        map
    }

    fn assert_cascade_invariant(map: &PermissionMap) {
        for (resource_id, grant) in map {
            assert!(
                !grant.has_write() || grant.read,
                "cascade violated for {resource_id}: {grant:?}"
            );
        }
    }

    #[test]
    fn test_toggle_write_implies_read() {
        let map = PermissionMap::new();

        let map = normalize_toggle(&map, "employees", Action::Update, true, false);
        assert_eq!(
            grants_of(&map, "employees"),
            Grant {
                read: true,
                create: false,
                update: true,
                delete: false
            }
        );

        let map = normalize_toggle(&map, "employees", Action::Read, false, false);
        assert_eq!(grants_of(&map, "employees"), Grant::NONE);
    }

    #[test]
    fn test_toggle_sequences_preserve_cascade_invariant() {
        let toggles = [
            ("employees", Action::Create, true),
            ("employees", Action::Delete, true),
            ("payroll", Action::Update, true),
            ("employees", Action::Read, false),
            ("payroll", Action::Create, false),
            ("leave", Action::Read, true),
            ("leave", Action::Read, false),
            ("payroll", Action::Read, false),
            ("fleet", Action::Delete, true),
            ("fleet", Action::Delete, false),
        ];

        let mut map = PermissionMap::new();
        for (resource_id, action, value) in toggles {
            map = normalize_toggle(&map, resource_id, action, value, false);
            assert_cascade_invariant(&map);
        }
    }

    #[test]
    fn test_toggle_is_idempotent() {
        let mut map = PermissionMap::new();
        map.insert("employees".to_string(), Grant::READ);

        for action in Action::ALL {
            for value in [true, false] {
                let once = normalize_toggle(&map, "employees", action, value, false);
                let twice = normalize_toggle(&once, "employees", action, value, false);
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn test_toggle_does_not_mutate_input() {
        let mut map = PermissionMap::new();
        map.insert("employees".to_string(), Grant::READ);

        let next = normalize_toggle(&map, "employees", Action::Delete, true, false);
        assert_eq!(grants_of(&map, "employees"), Grant::READ);
        assert!(grants_of(&next, "employees").delete);
    }

    #[test]
    fn test_system_role_is_immutable() {
        let mut map = PermissionMap::new();
        map.insert("employees".to_string(), Grant::FULL);

        for action in Action::ALL {
            for value in [true, false] {
                let next = normalize_toggle(&map, "employees", action, value, true);
                assert_eq!(next, map);
            }
        }

        // Even resources the map has never seen stay absent.
        let next = normalize_toggle(&map, "payroll", Action::Read, true, true);
        assert_eq!(next, map);
    }

    #[rstest]
    #[case(10, AccessLevel::Full)]
    #[case(9, AccessLevel::Full)] // exactly 0.9
    #[case(8, AccessLevel::Partial)]
    #[case(5, AccessLevel::Partial)] // exactly 0.5
    #[case(4, AccessLevel::Limited)]
    #[case(1, AccessLevel::Limited)]
    #[case(0, AccessLevel::NoAccess)]
    fn test_classification_thresholds(#[case] granted: usize, #[case] expected: AccessLevel) {
        let resources = ten_slot_catalog();
        let map = map_with_granted_slots(&resources, granted);
        assert_eq!(classify_access_level(&map, &resources), expected);
    }

    #[test]
    fn test_classification_ignores_grants_outside_allowed_actions() {
        let resources = vec![Resource {
            id: "reports",
            label: "Rapports",
            allowed_actions: &[Action::Read],
        }];

        // Full CRUD granted, but only the read slot counts: 1/1.
        let mut map = PermissionMap::new();
        map.insert("reports".to_string(), Grant::FULL);
        assert_eq!(classify_access_level(&map, &resources), AccessLevel::Full);
    }

    #[test]
    fn test_classification_is_monotonic_under_superset() {
        let resources = ten_slot_catalog();
        for smaller in 0..=10usize {
            for larger in smaller..=10usize {
                let m1 = map_with_granted_slots(&resources, smaller);
                let m2 = map_with_granted_slots(&resources, larger);
                assert!(
                    classify_access_level(&m2, &resources)
                        >= classify_access_level(&m1, &resources),
                    "classification regressed from {smaller} to {larger} granted slots"
                );
            }
        }
    }

    #[test]
    fn test_empty_catalog_classifies_as_no_access() {
        let map = PermissionMap::new();
        assert_eq!(classify_access_level(&map, &[]), AccessLevel::NoAccess);
    }

    #[test]
    fn test_point_queries_fail_closed() {
        let mut map = PermissionMap::new();
        map.insert("employees".to_string(), Grant::READ);

        assert!(can(&map, "employees", Action::Read));
        assert!(!can(&map, "employees", Action::Delete));
        assert!(!can(&map, "nonexistent-resource", Action::Read));
        assert_eq!(grants_of(&map, "nonexistent-resource"), Grant::NONE);
    }

    #[test]
    fn test_access_level_labels() {
        assert_eq!(AccessLevel::NoAccess.label(), "Aucun accès");
        assert_eq!(AccessLevel::Full.to_string(), "Accès complet");
    }

    #[test]
    fn test_permission_map_document_roundtrip() {
        let mut map = PermissionMap::new();
        map.insert("employees".to_string(), Grant::FULL);
        map.insert("reports".to_string(), Grant::READ);

        let document = serde_json::to_string(&map).unwrap();
        let restored: PermissionMap = serde_json::from_str(&document).unwrap();
        assert_eq!(restored, map);
    }
}
