//! Error types for the Orgshare system.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum OrgshareError {
    #[error("Application not found: {id} in tenant {tenant_domain}")]
    ApplicationNotFound { id: String, tenant_domain: String },

    #[error("Organization not found: {id}")]
    OrganizationNotFound { id: String },

    /// Policy rejection: a fragment application was targeted by a direct
    /// delete instead of the sanctioned teardown path.
    #[error(
        "Application with resource id {resource_id} is a fragment application \
         and cannot be deleted directly"
    )]
    FragmentDeleteForbidden { resource_id: Uuid },

    /// Policy rejection: the application still has fragments in other
    /// organizations.
    #[error(
        "Application with resource id {resource_id} is shared with other \
         organizations and cannot be deleted"
    )]
    SharedDeleteForbidden { resource_id: Uuid },

    #[error("Error while retrieving fragment application details")]
    FragmentResolution {
        #[source]
        source: Box<OrgshareError>,
    },

    #[error("Error while validating application for deletion")]
    DeleteValidation {
        #[source]
        source: Box<OrgshareError>,
    },

    #[error("Database error: {0}")]
    Database(String),
}

pub type OrgshareResult<T> = Result<T, OrgshareError>;
