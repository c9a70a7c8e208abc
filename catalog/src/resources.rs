//! The registry of protected resources.
//!
//! Declaration order is display order: the permission matrix renders its
//! rows exactly as listed here.

use authz::{Action, Resource};

const CRUD: &[Action] = &[Action::Read, Action::Create, Action::Update, Action::Delete];
const READ_ONLY: &[Action] = &[Action::Read];
const READ_UPDATE: &[Action] = &[Action::Read, Action::Update];

/// Every protected surface of the intranet.
const RESOURCES: &[Resource] = &[
    Resource {
        id: "employees",
        label: "Employés",
        allowed_actions: CRUD,
    },
    Resource {
        id: "payroll",
        label: "Paie",
        allowed_actions: CRUD,
    },
    Resource {
        id: "leave",
        label: "Congés",
        allowed_actions: CRUD,
    },
    Resource {
        id: "missions",
        label: "Missions",
        allowed_actions: CRUD,
    },
    Resource {
        id: "fleet",
        label: "Parc automobile",
        allowed_actions: CRUD,
    },
    Resource {
        id: "it-assets",
        label: "Matériel informatique",
        allowed_actions: CRUD,
    },
    Resource {
        id: "tickets",
        label: "Tickets d'assistance",
        allowed_actions: CRUD,
    },
    Resource {
        id: "customs-directory",
        label: "Annuaire des douanes",
        allowed_actions: CRUD,
    },
    Resource {
        id: "chiefdoms-directory",
        label: "Annuaire des chefferies",
        allowed_actions: CRUD,
    },
    Resource {
        id: "news",
        label: "Actualités",
        allowed_actions: CRUD,
    },
    // Reports and the dashboard are generated views; there is nothing to
    // create or delete through the matrix.
    Resource {
        id: "reports",
        label: "Rapports",
        allowed_actions: READ_ONLY,
    },
    Resource {
        id: "dashboard",
        label: "Tableau de bord",
        allowed_actions: READ_ONLY,
    },
    Resource {
        id: "settings",
        label: "Paramètres",
        allowed_actions: READ_UPDATE,
    },
    Resource {
        id: "permissions",
        label: "Gestion des droits",
        allowed_actions: READ_UPDATE,
    },
];

/// All resources, in display order.
pub fn resources() -> &'static [Resource] {
    RESOURCES
}

/// Looks up a resource by id.
pub fn find_resource(id: &str) -> Option<&'static Resource> {
    RESOURCES.iter().find(|resource| resource.id == id)
}
