//! SurrealDB implementation of [`OrganizationDirectory`].

use chrono::{DateTime, Utc};
use orgshare_core::error::{OrgshareError, OrgshareResult};
use orgshare_core::models::organization::{CreateOrganization, Organization};
use orgshare_core::repository::OrganizationDirectory;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct OrganizationRow {
    name: String,
    tenant_domain: String,
    created_at: DateTime<Utc>,
}

/// Projection carrying only the record ID via `record::id(id)`.
#[derive(Debug, SurrealValue)]
struct OrganizationIdRow {
    record_id: String,
}

/// Projection carrying only the tenant domain.
#[derive(Debug, SurrealValue)]
struct TenantDomainRow {
    tenant_domain: String,
}

/// SurrealDB implementation of organization-id ↔ tenant-domain
/// resolution, plus the provisioning-side registration helper.
#[derive(Clone)]
pub struct SurrealOrganizationDirectory<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealOrganizationDirectory<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Register a new organization. Used by the provisioning side and
    /// by tests; the consistency rules themselves only resolve.
    pub async fn add_organization(&self, input: CreateOrganization) -> OrgshareResult<Organization> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('organization', $id) SET \
                 name = $name, tenant_domain = $tenant_domain",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("tenant_domain", input.tenant_domain))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| {
            OrgshareError::Database(format!("CREATE returned no organization row for {id_str}"))
        })?;

        Ok(Organization {
            id,
            name: row.name,
            tenant_domain: row.tenant_domain,
            created_at: row.created_at,
        })
    }
}

impl<C: Connection> OrganizationDirectory for SurrealOrganizationDirectory<C> {
    async fn resolve_organization_id(&self, tenant_domain: &str) -> OrgshareResult<Uuid> {
        let mut result = self
            .db
            .query(
                "SELECT record::id(id) AS record_id FROM organization \
                 WHERE tenant_domain = $tenant_domain",
            )
            .bind(("tenant_domain", tenant_domain.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationIdRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| OrgshareError::OrganizationNotFound {
                id: format!("tenant_domain={tenant_domain}"),
            })?;

        Ok(Uuid::parse_str(&row.record_id)
            .map_err(|e| DbError::Codec(format!("invalid UUID: {e}")))?)
    }

    async fn resolve_tenant_domain(&self, organization_id: Uuid) -> OrgshareResult<String> {
        let id_str = organization_id.to_string();

        let mut result = self
            .db
            .query("SELECT tenant_domain FROM type::record('organization', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantDomainRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| OrgshareError::OrganizationNotFound { id: id_str })?;

        Ok(row.tenant_domain)
    }
}
