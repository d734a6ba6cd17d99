//! SurrealDB implementation of [`SharedApplicationDirectory`].

use orgshare_core::error::OrgshareResult;
use orgshare_core::models::sharing::SharedApplicationLink;
use orgshare_core::repository::SharedApplicationDirectory;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for sharing links.
#[derive(Debug, SurrealValue)]
struct LinkRow {
    main_application_id: String,
    main_organization_id: String,
    fragment_application_id: String,
    fragment_organization_id: String,
}

fn parse_uuid(value: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Codec(format!("invalid UUID: {e}")))
}

impl LinkRow {
    fn try_into_link(self) -> Result<SharedApplicationLink, DbError> {
        Ok(SharedApplicationLink {
            main_application_id: parse_uuid(&self.main_application_id)?,
            main_organization_id: parse_uuid(&self.main_organization_id)?,
            fragment_application_id: parse_uuid(&self.fragment_application_id)?,
            fragment_organization_id: parse_uuid(&self.fragment_organization_id)?,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of read access to the main ↔ fragment
/// sharing links, plus the provisioning-side link helpers.
#[derive(Clone)]
pub struct SurrealSharedApplicationDirectory<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSharedApplicationDirectory<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Record a new main ↔ fragment link. Used by the provisioning side
    /// and by tests. At most one link may exist per (fragment
    /// application, fragment organization); a second insert fails on
    /// the unique index.
    pub async fn add_link(&self, link: SharedApplicationLink) -> OrgshareResult<()> {
        self.db
            .query(
                "CREATE shared_application SET \
                 main_application_id = $main_application_id, \
                 main_organization_id = $main_organization_id, \
                 fragment_application_id = $fragment_application_id, \
                 fragment_organization_id = $fragment_organization_id",
            )
            .bind(("main_application_id", link.main_application_id.to_string()))
            .bind((
                "main_organization_id",
                link.main_organization_id.to_string(),
            ))
            .bind((
                "fragment_application_id",
                link.fragment_application_id.to_string(),
            ))
            .bind((
                "fragment_organization_id",
                link.fragment_organization_id.to_string(),
            ))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(())
    }

    /// Remove the link of a fragment, if any.
    pub async fn remove_link(
        &self,
        fragment_application_id: Uuid,
        fragment_organization_id: Uuid,
    ) -> OrgshareResult<()> {
        self.db
            .query(
                "DELETE shared_application \
                 WHERE fragment_application_id = $fragment_application_id \
                 AND fragment_organization_id = $fragment_organization_id",
            )
            .bind((
                "fragment_application_id",
                fragment_application_id.to_string(),
            ))
            .bind((
                "fragment_organization_id",
                fragment_organization_id.to_string(),
            ))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}

impl<C: Connection> SharedApplicationDirectory for SurrealSharedApplicationDirectory<C> {
    async fn main_application_link(
        &self,
        fragment_application_id: Uuid,
        fragment_organization_id: Uuid,
    ) -> OrgshareResult<Option<SharedApplicationLink>> {
        let mut result = self
            .db
            .query(
                "SELECT * FROM shared_application \
                 WHERE fragment_application_id = $fragment_application_id \
                 AND fragment_organization_id = $fragment_organization_id",
            )
            .bind((
                "fragment_application_id",
                fragment_application_id.to_string(),
            ))
            .bind((
                "fragment_organization_id",
                fragment_organization_id.to_string(),
            ))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<LinkRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_link()?)),
            None => Ok(None),
        }
    }

    async fn has_fragments(&self, application_id: Uuid) -> OrgshareResult<bool> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM shared_application \
                 WHERE main_application_id = $main_application_id \
                 GROUP ALL",
            )
            .bind(("main_application_id", application_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        let total = rows.first().map(|r| r.total).unwrap_or(0);

        Ok(total > 0)
    }
}
