//! SurrealDB implementation of [`ApplicationRepository`].

use chrono::{DateTime, Utc};
use orgshare_core::error::{OrgshareError, OrgshareResult};
use orgshare_core::models::application::{
    Application, ApplicationProperty, ClaimConfig, CreateApplication, InboundAuthConfig,
    SignOnConfig,
};
use orgshare_core::repository::ApplicationRepository;
use serde::{Deserialize, Serialize};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// The free-form part of an application record, stored as one FLEXIBLE
/// object under `definition`.
#[derive(Debug, Serialize, Deserialize)]
struct ApplicationDoc {
    description: Option<String>,
    properties: Vec<ApplicationProperty>,
    inbound_auth: InboundAuthConfig,
    sign_on: Option<SignOnConfig>,
    claim_config: ClaimConfig,
}

impl ApplicationDoc {
    fn of(application: &Application) -> Self {
        Self {
            description: application.description.clone(),
            properties: application.properties.clone(),
            inbound_auth: application.inbound_auth.clone(),
            sign_on: application.sign_on.clone(),
            claim_config: application.claim_config.clone(),
        }
    }
}

fn encode_definition(doc: ApplicationDoc) -> Result<serde_json::Value, DbError> {
    serde_json::to_value(doc).map_err(|e| DbError::Codec(format!("application definition: {e}")))
}

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct ApplicationRow {
    name: String,
    definition: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ApplicationRow {
    fn into_application(self, resource_id: Uuid) -> Result<Application, DbError> {
        let doc: ApplicationDoc = serde_json::from_value(self.definition)
            .map_err(|e| DbError::Codec(format!("application definition: {e}")))?;
        Ok(Application {
            resource_id,
            name: self.name,
            description: doc.description,
            properties: doc.properties,
            inbound_auth: doc.inbound_auth,
            sign_on: doc.sign_on,
            claim_config: doc.claim_config,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `record::id(id)`.
#[derive(Debug, SurrealValue)]
struct ApplicationRowWithId {
    record_id: String,
    name: String,
    definition: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ApplicationRowWithId {
    fn try_into_application(self) -> Result<Application, DbError> {
        let resource_id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Codec(format!("invalid UUID: {e}")))?;
        ApplicationRow {
            name: self.name,
            definition: self.definition,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_application(resource_id)
    }
}

/// SurrealDB implementation of the application store.
#[derive(Clone)]
pub struct SurrealApplicationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealApplicationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ApplicationRepository for SurrealApplicationRepository<C> {
    async fn create(&self, input: CreateApplication) -> OrgshareResult<Application> {
        let resource_id = Uuid::new_v4();
        let id_str = resource_id.to_string();

        let definition = encode_definition(ApplicationDoc {
            description: input.description,
            properties: input.properties,
            inbound_auth: input.inbound_auth,
            sign_on: input.sign_on,
            claim_config: input.claim_config,
        })?;

        let result = self
            .db
            .query(
                "CREATE type::record('application', $id) SET \
                 tenant_domain = $tenant_domain, name = $name, \
                 definition = $definition",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_domain", input.tenant_domain))
            .bind(("name", input.name))
            .bind(("definition", definition))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<ApplicationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| {
            OrgshareError::Database(format!("CREATE returned no application row for {id_str}"))
        })?;

        Ok(row.into_application(resource_id)?)
    }

    async fn get_by_resource_id(
        &self,
        resource_id: Uuid,
        tenant_domain: &str,
    ) -> OrgshareResult<Application> {
        let id_str = resource_id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('application', $id) \
                 WHERE tenant_domain = $tenant_domain",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_domain", tenant_domain.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ApplicationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| OrgshareError::ApplicationNotFound {
                id: id_str,
                tenant_domain: tenant_domain.to_string(),
            })?;

        Ok(row.into_application(resource_id)?)
    }

    async fn get_by_name(&self, name: &str, tenant_domain: &str) -> OrgshareResult<Application> {
        let mut result = self
            .db
            .query(
                "SELECT record::id(id) AS record_id, * FROM application \
                 WHERE tenant_domain = $tenant_domain AND name = $name",
            )
            .bind(("tenant_domain", tenant_domain.to_string()))
            .bind(("name", name.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ApplicationRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| OrgshareError::ApplicationNotFound {
                id: format!("name={name}"),
                tenant_domain: tenant_domain.to_string(),
            })?;

        Ok(row.try_into_application()?)
    }

    async fn update(
        &self,
        application: &Application,
        tenant_domain: &str,
    ) -> OrgshareResult<Application> {
        let id_str = application.resource_id.to_string();
        let definition = encode_definition(ApplicationDoc::of(application))?;

        let result = self
            .db
            .query(
                "UPDATE type::record('application', $id) SET \
                 name = $name, definition = $definition, \
                 updated_at = time::now() \
                 WHERE tenant_domain = $tenant_domain",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", application.name.clone()))
            .bind(("definition", definition))
            .bind(("tenant_domain", tenant_domain.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<ApplicationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| OrgshareError::ApplicationNotFound {
                id: id_str,
                tenant_domain: tenant_domain.to_string(),
            })?;

        Ok(row.into_application(application.resource_id)?)
    }

    async fn delete(&self, resource_id: Uuid, tenant_domain: &str) -> OrgshareResult<()> {
        self.db
            .query(
                "DELETE type::record('application', $id) \
                 WHERE tenant_domain = $tenant_domain",
            )
            .bind(("id", resource_id.to_string()))
            .bind(("tenant_domain", tenant_domain.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
