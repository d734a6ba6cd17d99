//! Main ↔ fragment application link model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Relationship record tying a fragment application to the main
/// application it was propagated from.
///
/// At most one link exists per (fragment application, fragment
/// organization) pair; a main application may have any number of
/// fragments. The link is created and removed by the provisioning
/// subsystem — the consistency rules only read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedApplicationLink {
    pub main_application_id: Uuid,
    pub main_organization_id: Uuid,
    pub fragment_application_id: Uuid,
    pub fragment_organization_id: Uuid,
}
