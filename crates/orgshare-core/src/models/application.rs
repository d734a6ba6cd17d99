//! Application domain model.
//!
//! An application record lives within one tenant/organization context.
//! A "main" application owned by one organization can be propagated into
//! descendant organizations as read-only "fragment" applications; the
//! fragment marker property distinguishes the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Property name marking an application as a fragment of a shared main
/// application. Matched case-insensitively.
pub const IS_FRAGMENT_APP: &str = "isFragmentApp";

/// One name/value entry in an application's property bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationProperty {
    pub name: String,
    pub value: String,
}

/// One inbound authentication protocol binding (e.g., an OIDC or SAML
/// registration) of an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundAuthRequestConfig {
    /// Protocol-level key (client id, issuer, ...).
    pub auth_key: String,
    /// Protocol type (e.g., `oauth2`, `samlsso`).
    pub auth_type: String,
    pub properties: Vec<ApplicationProperty>,
}

/// Inbound authentication wiring of an application.
///
/// On fragment applications this is installed by the provisioning
/// subsystem and must never drift from the main application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundAuthConfig {
    pub request_configs: Vec<InboundAuthRequestConfig>,
}

/// Local sign-on settings of an application: how the authenticated
/// subject identifier is composed, plus consent behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignOnConfig {
    pub use_tenant_domain_in_local_subject_identifier: bool,
    pub use_userstore_domain_in_local_subject_identifier: bool,
    pub use_userstore_domain_in_roles: bool,
    pub skip_consent: bool,
    pub skip_logout_consent: bool,
}

/// Mapping between a local claim and the claim exposed to the
/// application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimMapping {
    pub local_claim: String,
    pub application_claim: String,
    pub requested: bool,
    pub mandatory: bool,
}

/// Claim (attribute mapping) configuration of an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimConfig {
    pub local_claim_dialect: bool,
    pub role_claim_uri: Option<String>,
    pub claim_mappings: Vec<ClaimMapping>,
}

/// An application definition within one tenant domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    /// Stable, globally unique identity of this application instance.
    pub resource_id: Uuid,
    /// Display name, unique within the tenant domain.
    pub name: String,
    pub description: Option<String>,
    /// Extensible name/value metadata; carries the fragment marker.
    pub properties: Vec<ApplicationProperty>,
    pub inbound_auth: InboundAuthConfig,
    pub sign_on: Option<SignOnConfig>,
    pub claim_config: ClaimConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Whether this record is a fragment of a shared main application.
    ///
    /// True iff the property bag contains an entry whose name matches
    /// [`IS_FRAGMENT_APP`] case-insensitively and whose value parses as
    /// boolean true (`"true"` in any casing; `"false"`, `""`, `"1"` or a
    /// missing property all read as false). Evaluated fresh on every
    /// call — the property bag may be mutated between checks within a
    /// single operation.
    pub fn is_fragment(&self) -> bool {
        self.properties.iter().any(|p| {
            p.name.eq_ignore_ascii_case(IS_FRAGMENT_APP) && p.value.eq_ignore_ascii_case("true")
        })
    }
}

/// Fields required to create a new application. The resource id and
/// timestamps are generated by storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateApplication {
    pub tenant_domain: String,
    pub name: String,
    pub description: Option<String>,
    pub properties: Vec<ApplicationProperty>,
    pub inbound_auth: InboundAuthConfig,
    pub sign_on: Option<SignOnConfig>,
    pub claim_config: ClaimConfig,
}
