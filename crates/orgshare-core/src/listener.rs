//! Application lifecycle listener contract.
//!
//! Listeners run around the update, read, and delete operations of the
//! application lifecycle service. Each hook returns a [`Flow`] telling
//! the service whether to carry on with the generic operation. Unlike
//! the repository traits, this trait is object-safe (listeners of
//! different types are held behind `dyn`), hence `async_trait`.

use async_trait::async_trait;

use crate::error::OrgshareResult;
use crate::models::application::Application;

/// Signal returned by lifecycle hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Proceed with the operation.
    Continue,
    /// Skip the generic operation without raising an error.
    Halt,
}

/// How a delete request entered the system.
///
/// Carried explicitly on every delete call so that the sanctioned
/// internal teardown path is distinguishable from a direct caller
/// delete without any ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteIntent {
    /// A caller asked to delete this application directly.
    Direct,
    /// The provisioning subsystem is tearing the application down
    /// (e.g., as part of organization removal or unsharing).
    Teardown,
}

/// Hooks invoked by the lifecycle service around application
/// operations. Implementations override only the hooks they care
/// about; the defaults pass everything through.
#[async_trait]
pub trait ApplicationListener: Send + Sync {
    /// Execution order relative to other listeners; lower runs first.
    fn order(&self) -> u32;

    /// Whether this listener participates at all. Consulted once per
    /// operation.
    fn enabled(&self) -> bool {
        true
    }

    /// Runs before an application update is persisted. May rewrite the
    /// proposed record in place.
    async fn before_update(
        &self,
        _application: &mut Application,
        _tenant_domain: &str,
        _actor: &str,
    ) -> OrgshareResult<Flow> {
        Ok(Flow::Continue)
    }

    /// Runs after an application record has been fetched. May enrich
    /// the record in place.
    async fn after_get(
        &self,
        _application: &mut Application,
        _name: &str,
        _tenant_domain: &str,
    ) -> OrgshareResult<Flow> {
        Ok(Flow::Continue)
    }

    /// Runs before an application is deleted.
    async fn before_delete(
        &self,
        _name: &str,
        _tenant_domain: &str,
        _actor: &str,
        _intent: DeleteIntent,
    ) -> OrgshareResult<Flow> {
        Ok(Flow::Continue)
    }
}
