//! Application lifecycle service.
//!
//! A thin framework around the application repository: registered
//! listeners run in order around the update, read, and delete
//! operations and may rewrite records, enrich read views, or stop an
//! operation. All application state lives in the repository; the
//! service owns only the listener registry.

use std::sync::Arc;

use orgshare_core::error::{OrgshareError, OrgshareResult};
use orgshare_core::listener::{ApplicationListener, DeleteIntent, Flow};
use orgshare_core::models::application::Application;
use orgshare_core::repository::ApplicationRepository;
use tracing::debug;

/// Dispatches application operations through the registered listeners.
///
/// Generic over the repository implementation so the service layer has
/// no dependency on the database crate.
pub struct ApplicationService<R: ApplicationRepository> {
    applications: R,
    listeners: Vec<Arc<dyn ApplicationListener>>,
}

impl<R: ApplicationRepository> ApplicationService<R> {
    pub fn new(applications: R) -> Self {
        Self {
            applications,
            listeners: Vec::new(),
        }
    }

    /// Register a lifecycle listener. Listeners run in ascending
    /// [`ApplicationListener::order`] on every operation.
    pub fn register_listener(&mut self, listener: Arc<dyn ApplicationListener>) {
        self.listeners.push(listener);
        self.listeners.sort_by_key(|listener| listener.order());
    }

    /// Update an application. Listeners may rewrite the proposed record
    /// before it is persisted; a halting listener skips persistence and
    /// the record is returned as rewritten so far.
    pub async fn update_application(
        &self,
        mut application: Application,
        tenant_domain: &str,
        actor: &str,
    ) -> OrgshareResult<Application> {
        for listener in &self.listeners {
            if !listener.enabled() {
                continue;
            }
            if listener
                .before_update(&mut application, tenant_domain, actor)
                .await?
                == Flow::Halt
            {
                debug!(name = %application.name, tenant_domain, "update halted by listener");
                return Ok(application);
            }
        }

        self.applications.update(&application, tenant_domain).await
    }

    /// Fetch an application by name and run the read listeners over the
    /// fetched record. Absence surfaces as
    /// [`OrgshareError::ApplicationNotFound`].
    pub async fn get_application_by_name(
        &self,
        name: &str,
        tenant_domain: &str,
    ) -> OrgshareResult<Application> {
        let mut application = self.applications.get_by_name(name, tenant_domain).await?;

        for listener in &self.listeners {
            if !listener.enabled() {
                continue;
            }
            if listener
                .after_get(&mut application, name, tenant_domain)
                .await?
                == Flow::Halt
            {
                break;
            }
        }

        Ok(application)
    }

    /// Delete an application by name.
    ///
    /// `intent` states which path the delete came through; only
    /// [`DeleteIntent::Teardown`] may remove fragment applications. A
    /// missing target is a silent no-op.
    pub async fn delete_application(
        &self,
        name: &str,
        tenant_domain: &str,
        actor: &str,
        intent: DeleteIntent,
    ) -> OrgshareResult<()> {
        for listener in &self.listeners {
            if !listener.enabled() {
                continue;
            }
            if listener
                .before_delete(name, tenant_domain, actor, intent)
                .await?
                == Flow::Halt
            {
                debug!(name, tenant_domain, "delete halted by listener");
                return Ok(());
            }
        }

        let application = match self.applications.get_by_name(name, tenant_domain).await {
            Ok(application) => application,
            Err(OrgshareError::ApplicationNotFound { .. }) => {
                debug!(name, tenant_domain, "delete target does not exist");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        self.applications
            .delete(application.resource_id, tenant_domain)
            .await
    }
}
