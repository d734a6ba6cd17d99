//! Organization domain model.
//!
//! Organizations are the nodes of the sharing hierarchy. Each owns
//! exactly one tenant domain; applications are addressed per tenant
//! domain, links between applications per organization id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One organization in the hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// Tenant domain owned by this organization (e.g., `sub.acme.com`).
    /// Unique across the hierarchy.
    pub tenant_domain: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to register a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub tenant_domain: String,
}
