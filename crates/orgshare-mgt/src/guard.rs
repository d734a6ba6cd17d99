//! Fragment application guard.
//!
//! A main application owned by one organization is propagated into
//! descendant organizations as read-only fragment applications. This
//! listener keeps fragments from drifting away from the configuration
//! the provisioning subsystem installed, merges main-application data
//! into fragment read views, and blocks deletes that would break the
//! sharing hierarchy.

use async_trait::async_trait;
use orgshare_core::error::{OrgshareError, OrgshareResult};
use orgshare_core::listener::{ApplicationListener, DeleteIntent, Flow};
use orgshare_core::models::application::Application;
use orgshare_core::repository::{
    ApplicationRepository, OrganizationDirectory, SharedApplicationDirectory,
};

use crate::config::FragmentGuardConfig;

/// Listener order slot of the fragment guard. Mid-range so that basic
/// validation listeners can run before it.
pub const FRAGMENT_GUARD_ORDER: u32 = 50;

/// Lifecycle listener enforcing fragment consistency.
///
/// Generic over the collaborator implementations so the guard logic has
/// no dependency on the database crate.
pub struct FragmentApplicationGuard<R, O, S> {
    applications: R,
    organizations: O,
    shared: S,
    config: FragmentGuardConfig,
}

impl<R, O, S> FragmentApplicationGuard<R, O, S>
where
    R: ApplicationRepository,
    O: OrganizationDirectory,
    S: SharedApplicationDirectory,
{
    pub fn new(applications: R, organizations: O, shared: S, config: FragmentGuardConfig) -> Self {
        Self {
            applications,
            organizations,
            shared,
            config,
        }
    }
}

fn resolution_failure(source: OrgshareError) -> OrgshareError {
    OrgshareError::FragmentResolution {
        source: Box::new(source),
    }
}

#[async_trait]
impl<R, O, S> ApplicationListener for FragmentApplicationGuard<R, O, S>
where
    R: ApplicationRepository,
    O: OrganizationDirectory,
    S: SharedApplicationDirectory,
{
    fn order(&self) -> u32 {
        FRAGMENT_GUARD_ORDER
    }

    fn enabled(&self) -> bool {
        self.config.enabled
    }

    /// Fragments track their main application: the property bag (which
    /// carries the fragment marker) and the inbound authentication
    /// wiring must stay exactly as provisioned, whatever the caller
    /// proposed. Everything else passes through.
    async fn before_update(
        &self,
        application: &mut Application,
        tenant_domain: &str,
        _actor: &str,
    ) -> OrgshareResult<Flow> {
        let existing = match self
            .applications
            .get_by_resource_id(application.resource_id, tenant_domain)
            .await
        {
            Ok(existing) => existing,
            // Nothing stored means nothing to protect; the downstream
            // update decides how to report the missing record.
            Err(OrgshareError::ApplicationNotFound { .. }) => return Ok(Flow::Continue),
            Err(e) => return Err(e),
        };

        if existing.is_fragment() {
            application.properties = existing.properties;
            application.inbound_auth = existing.inbound_auth;
        }

        Ok(Flow::Continue)
    }

    /// Enrich a fetched fragment record with authoritative data from
    /// its main application. The merge is in-memory only; nothing is
    /// persisted.
    async fn after_get(
        &self,
        application: &mut Application,
        _name: &str,
        tenant_domain: &str,
    ) -> OrgshareResult<Flow> {
        if !application.is_fragment() {
            return Ok(Flow::Continue);
        }

        // 1. Resolve the organization owning this tenant domain.
        let organization_id = self
            .organizations
            .resolve_organization_id(tenant_domain)
            .await
            .map_err(resolution_failure)?;

        // 2. Find the main-application link. A fragment without a link
        //    is returned as-is.
        let Some(link) = self
            .shared
            .main_application_link(application.resource_id, organization_id)
            .await
            .map_err(resolution_failure)?
        else {
            return Ok(Flow::Continue);
        };

        // 3. Fetch the main application from its owning tenant.
        let main_tenant_domain = self
            .organizations
            .resolve_tenant_domain(link.main_organization_id)
            .await
            .map_err(resolution_failure)?;
        let main = self
            .applications
            .get_by_resource_id(link.main_application_id, &main_tenant_domain)
            .await
            .map_err(resolution_failure)?;

        // 4. Claim configuration comes wholesale from the main record.
        application.claim_config = main.claim_config;

        // 5. Of the sign-on settings, exactly the three subject/role
        //    composition flags follow the main record; the rest stay
        //    fragment-local.
        if let (Some(sign_on), Some(main_sign_on)) =
            (application.sign_on.as_mut(), main.sign_on.as_ref())
        {
            sign_on.use_tenant_domain_in_local_subject_identifier =
                main_sign_on.use_tenant_domain_in_local_subject_identifier;
            sign_on.use_userstore_domain_in_local_subject_identifier =
                main_sign_on.use_userstore_domain_in_local_subject_identifier;
            sign_on.use_userstore_domain_in_roles = main_sign_on.use_userstore_domain_in_roles;
        }

        Ok(Flow::Continue)
    }

    /// Reject deletes that would break the hierarchy: fragments may
    /// only go through the teardown path, and a main application with
    /// live fragments may not go at all.
    async fn before_delete(
        &self,
        name: &str,
        tenant_domain: &str,
        _actor: &str,
        intent: DeleteIntent,
    ) -> OrgshareResult<Flow> {
        let application = match self.applications.get_by_name(name, tenant_domain).await {
            Ok(application) => application,
            // Nothing to delete; halt so the framework skips the
            // generic delete and reports through its own path.
            Err(OrgshareError::ApplicationNotFound { .. }) => return Ok(Flow::Halt),
            Err(e) => return Err(e),
        };

        if application.is_fragment() {
            return match intent {
                DeleteIntent::Teardown => Ok(Flow::Continue),
                DeleteIntent::Direct => Err(OrgshareError::FragmentDeleteForbidden {
                    resource_id: application.resource_id,
                }),
            };
        }

        let has_fragments = self
            .shared
            .has_fragments(application.resource_id)
            .await
            .map_err(|e| OrgshareError::DeleteValidation {
                source: Box::new(e),
            })?;
        if has_fragments {
            return Err(OrgshareError::SharedDeleteForbidden {
                resource_id: application.resource_id,
            });
        }

        Ok(Flow::Continue)
    }
}
