//! Collaborator trait definitions for data access abstraction.
//!
//! All operations are async. Application lookups carry a `tenant_domain`
//! parameter to enforce per-organization isolation. The two directory
//! traits are read-only by design: the organization mapping and the
//! sharing links are owned by the provisioning subsystem, and the
//! consistency rules only consult them.

use uuid::Uuid;

use crate::error::OrgshareResult;
use crate::models::application::{Application, CreateApplication};
use crate::models::sharing::SharedApplicationLink;

/// Source of truth for application records.
pub trait ApplicationRepository: Send + Sync {
    fn create(
        &self,
        input: CreateApplication,
    ) -> impl Future<Output = OrgshareResult<Application>> + Send;
    fn get_by_resource_id(
        &self,
        resource_id: Uuid,
        tenant_domain: &str,
    ) -> impl Future<Output = OrgshareResult<Application>> + Send;
    fn get_by_name(
        &self,
        name: &str,
        tenant_domain: &str,
    ) -> impl Future<Output = OrgshareResult<Application>> + Send;
    /// Replace the stored definition of an application wholesale with
    /// the given record (matched by resource id within the tenant).
    fn update(
        &self,
        application: &Application,
        tenant_domain: &str,
    ) -> impl Future<Output = OrgshareResult<Application>> + Send;
    fn delete(
        &self,
        resource_id: Uuid,
        tenant_domain: &str,
    ) -> impl Future<Output = OrgshareResult<()>> + Send;
}

/// Organization-id ↔ tenant-domain resolution.
pub trait OrganizationDirectory: Send + Sync {
    fn resolve_organization_id(
        &self,
        tenant_domain: &str,
    ) -> impl Future<Output = OrgshareResult<Uuid>> + Send;
    fn resolve_tenant_domain(
        &self,
        organization_id: Uuid,
    ) -> impl Future<Output = OrgshareResult<String>> + Send;
}

/// Read access to the main ↔ fragment sharing links.
pub trait SharedApplicationDirectory: Send + Sync {
    /// The main-application link for a fragment, if one exists. Absence
    /// is an ordinary outcome, not an error.
    fn main_application_link(
        &self,
        fragment_application_id: Uuid,
        fragment_organization_id: Uuid,
    ) -> impl Future<Output = OrgshareResult<Option<SharedApplicationLink>>> + Send;
    /// Whether any fragments of the given application exist.
    fn has_fragments(
        &self,
        application_id: Uuid,
    ) -> impl Future<Output = OrgshareResult<bool>> + Send;
}
