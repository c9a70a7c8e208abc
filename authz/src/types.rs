//! Core authorization types for the grant-matrix permission system.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A CRUD action performed against a protected resource.
///
/// Examples: reading the employee list, creating a leave request, updating a
/// payroll entry, deleting a fleet vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    /// All actions, in matrix column order.
    pub const ALL: [Action; 4] = [Action::Read, Action::Create, Action::Update, Action::Delete];

    /// Stable identifier used in persisted documents and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A protected unit of application functionality (a page or data collection).
///
/// Resources are declared at build time by the `catalog` crate and never
/// change at runtime. Not every resource supports every action; a read-only
/// resource lists only [`Action::Read`] in `allowed_actions`, and the matrix
/// UI renders no checkbox for the excluded actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resource {
    /// Unique key, e.g. `"employees"`.
    pub id: &'static str,

    /// French display label, e.g. `"Employés"`.
    pub label: &'static str,

    /// The subset of CRUD actions this resource supports.
    pub allowed_actions: &'static [Action],
}

impl Resource {
    /// Returns `true` if this resource supports `action`.
    pub fn allows(&self, action: Action) -> bool {
        self.allowed_actions.contains(&action)
    }
}

/// A role users are assigned to.
///
/// Exactly one role carries `is_system = true`; its grants are fixed and
/// cannot be edited through [`crate::engine::normalize_toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Role {
    /// Unique key, e.g. `"hr"`.
    pub id: &'static str,

    /// French display label, e.g. `"Ressources humaines"`.
    pub label: &'static str,

    /// System roles are immutable through the normal update path.
    pub is_system: bool,
}

/// The four CRUD booleans for one role on one resource.
///
/// For a resource whose `allowed_actions` excludes an action, that action's
/// boolean is meaningless for the UI but is still stored as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub create: bool,
    #[serde(default)]
    pub update: bool,
    #[serde(default)]
    pub delete: bool,
}

impl Grant {
    /// No access at all.
    pub const NONE: Grant = Grant {
        read: false,
        create: false,
        update: false,
        delete: false,
    };

    /// Full CRUD access.
    pub const FULL: Grant = Grant {
        read: true,
        create: true,
        update: true,
        delete: true,
    };

    /// Read-only access.
    pub const READ: Grant = Grant {
        read: true,
        create: false,
        update: false,
        delete: false,
    };

    /// Read and create, no update/delete (e.g. an employee filing tickets).
    pub const READ_CREATE: Grant = Grant {
        read: true,
        create: true,
        update: false,
        delete: false,
    };

    /// Read and update, no create/delete (e.g. a manager approving leave).
    pub const READ_UPDATE: Grant = Grant {
        read: true,
        create: false,
        update: true,
        delete: false,
    };

    /// Returns the boolean for `action`.
    pub fn get(&self, action: Action) -> bool {
        match action {
            Action::Read => self.read,
            Action::Create => self.create,
            Action::Update => self.update,
            Action::Delete => self.delete,
        }
    }

    /// Sets the boolean for `action`. Does not apply cascade rules; use
    /// [`crate::engine::normalize_toggle`] for user-driven changes.
    pub fn set(&mut self, action: Action, value: bool) {
        match action {
            Action::Read => self.read = value,
            Action::Create => self.create = value,
            Action::Update => self.update = value,
            Action::Delete => self.delete = value,
        }
    }

    /// Returns `true` if any of create/update/delete is granted.
    pub fn has_write(&self) -> bool {
        self.create || self.update || self.delete
    }

    /// Returns `true` if nothing is granted.
    pub fn is_empty(&self) -> bool {
        !(self.read || self.create || self.update || self.delete)
    }

    /// Returns this grant with every action the resource does not support
    /// forced to `false`.
    pub fn restricted_to(&self, resource: &Resource) -> Grant {
        Grant {
            read: self.read && resource.allows(Action::Read),
            create: self.create && resource.allows(Action::Create),
            update: self.update && resource.allows(Action::Update),
            delete: self.delete && resource.allows(Action::Delete),
        }
    }
}

/// The complete set of grants for one role, keyed by resource id.
///
/// One map exists per role. It is created lazily by the store the first time
/// a role's permissions are requested, mutated only through
/// [`crate::engine::normalize_toggle`], and written back on explicit save.
pub type PermissionMap = HashMap<String, Grant>;
