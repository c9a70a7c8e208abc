//! The registry of roles and their default grants.

use authz::{Grant, Role};

/// Every role users can hold, in display order.
///
/// `admin` is the single system role: its grants are seeded once and can
/// never be edited through the engine's mutating entry point.
const ROLES: &[Role] = &[
    Role {
        id: "admin",
        label: "Administrateur",
        is_system: true,
    },
    Role {
        id: "hr",
        label: "Ressources humaines",
        is_system: false,
    },
    Role {
        id: "accountant",
        label: "Comptable",
        is_system: false,
    },
    Role {
        id: "logistics",
        label: "Logistique",
        is_system: false,
    },
    Role {
        id: "it-support",
        label: "Support informatique",
        is_system: false,
    },
    Role {
        id: "department-head",
        label: "Chef de service",
        is_system: false,
    },
    Role {
        id: "employee",
        label: "Employé",
        is_system: false,
    },
];

/// All roles, in display order.
pub fn roles() -> &'static [Role] {
    ROLES
}

/// Looks up a role by id.
pub fn find_role(id: &str) -> Option<&'static Role> {
    ROLES.iter().find(|role| role.id == id)
}

/// The default grant a role receives on one resource, before restriction to
/// the resource's allowed actions.
///
/// Anything not listed falls through to [`Grant::NONE`]; new resources are
/// therefore invisible to a role until someone grants them explicitly.
pub(crate) fn default_grant(role_id: &str, resource_id: &str) -> Grant {
    match role_id {
        "admin" => Grant::FULL,
        "hr" => match resource_id {
            "employees" | "payroll" | "leave" | "missions" => Grant::FULL,
            "news" | "reports" | "dashboard" | "customs-directory" | "chiefdoms-directory" => {
                Grant::READ
            }
            _ => Grant::NONE,
        },
        "accountant" => match resource_id {
            "payroll" => Grant::FULL,
            "employees" | "missions" | "reports" | "dashboard" => Grant::READ,
            _ => Grant::NONE,
        },
        "logistics" => match resource_id {
            "fleet" | "it-assets" => Grant::FULL,
            "missions" | "dashboard" => Grant::READ,
            _ => Grant::NONE,
        },
        "it-support" => match resource_id {
            "it-assets" | "tickets" => Grant::FULL,
            "employees" | "dashboard" => Grant::READ,
            _ => Grant::NONE,
        },
        "department-head" => match resource_id {
            "leave" | "missions" => Grant::READ_UPDATE,
            "employees" | "tickets" | "news" | "reports" | "dashboard" => Grant::READ,
            _ => Grant::NONE,
        },
        "employee" => match resource_id {
            "tickets" | "leave" => Grant::READ_CREATE,
            "news" | "dashboard" | "customs-directory" | "chiefdoms-directory" => Grant::READ,
            _ => Grant::NONE,
        },
        _ => Grant::NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_order_starts_with_admin() {
        assert_eq!(roles()[0].id, "admin");
        assert!(roles()[0].is_system);
    }

    #[test]
    fn test_find_role() {
        let hr = find_role("hr").unwrap();
        assert_eq!(hr.label, "Ressources humaines");
        assert!(!hr.is_system);

        assert!(find_role("nonexistent-role").is_none());
    }

    #[test]
    fn test_role_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for role in roles() {
            assert!(seen.insert(role.id), "duplicate role id {}", role.id);
        }
    }

    #[test]
    fn test_default_grants_per_role() {
        assert_eq!(default_grant("admin", "payroll"), Grant::FULL);
        assert_eq!(default_grant("accountant", "payroll"), Grant::FULL);
        assert_eq!(default_grant("accountant", "fleet"), Grant::NONE);
        assert_eq!(default_grant("department-head", "leave"), Grant::READ_UPDATE);
        assert_eq!(default_grant("employee", "tickets"), Grant::READ_CREATE);
        assert_eq!(default_grant("nonexistent-role", "employees"), Grant::NONE);
    }
}
