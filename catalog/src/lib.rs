//! Static resource and role catalogs for the HR intranet.
//!
//! Every protected surface of the application (pages, data collections) and
//! every role users can hold are declared here at build time. The catalogs
//! are plain constant data: lookups are pure, have no side effects, and
//! fail closed on unknown ids so that read paths used pervasively for UI
//! gating can never crash an unrelated page.

pub mod resources;
pub mod roles;

use authz::{Grant, PermissionMap};
use tracing::debug;

pub use resources::{find_resource, resources};
pub use roles::{find_role, roles};

/// Builds the default permission map for a role.
///
/// Starts from an all-`false` baseline covering every cataloged resource,
/// then applies the role's overrides, restricted to each resource's allowed
/// actions. An unknown `role_id` returns the bare baseline rather than
/// erroring.
pub fn default_permission_map(role_id: &str) -> PermissionMap {
    let mut map: PermissionMap = resources()
        .iter()
        .map(|resource| (resource.id.to_string(), Grant::NONE))
        .collect();

    if find_role(role_id).is_none() {
        debug!(role_id, "unknown role, returning all-false baseline");
        return map;
    }

    for resource in resources() {
        let grant = roles::default_grant(role_id, resource.id).restricted_to(resource);
        map.insert(resource.id.to_string(), grant);
    }

    map
}
