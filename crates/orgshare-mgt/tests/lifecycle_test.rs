//! Integration tests for the application lifecycle service itself:
//! listener ordering, halting, the enabled flag, and how the fragment
//! guard reports a failing collaborator.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use orgshare_core::error::{OrgshareError, OrgshareResult};
use orgshare_core::listener::{ApplicationListener, DeleteIntent, Flow};
use orgshare_core::models::application::{
    Application, ApplicationProperty, CreateApplication, IS_FRAGMENT_APP,
};
use orgshare_core::models::organization::CreateOrganization;
use orgshare_core::models::sharing::SharedApplicationLink;
use orgshare_core::repository::{ApplicationRepository, SharedApplicationDirectory};
use orgshare_db::repository::{SurrealApplicationRepository, SurrealOrganizationDirectory};
use orgshare_mgt::{ApplicationService, FragmentApplicationGuard, FragmentGuardConfig};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn mem_db() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    orgshare_db::run_migrations(&db).await.unwrap();
    db
}

async fn setup() -> (
    ApplicationService<SurrealApplicationRepository<Db>>,
    SurrealApplicationRepository<Db>,
) {
    let db = mem_db().await;
    let applications = SurrealApplicationRepository::new(db);
    (
        ApplicationService::new(applications.clone()),
        applications,
    )
}

fn sample_create(tenant_domain: &str, name: &str) -> CreateApplication {
    CreateApplication {
        tenant_domain: tenant_domain.into(),
        name: name.into(),
        ..Default::default()
    }
}

fn fragment_create(tenant_domain: &str, name: &str) -> CreateApplication {
    CreateApplication {
        properties: vec![ApplicationProperty {
            name: IS_FRAGMENT_APP.into(),
            value: "true".into(),
        }],
        ..sample_create(tenant_domain, name)
    }
}

/// Listener that records when its update hook fires.
struct RecordingListener {
    order: u32,
    enabled: bool,
    log: Arc<Mutex<Vec<u32>>>,
}

#[async_trait]
impl ApplicationListener for RecordingListener {
    fn order(&self) -> u32 {
        self.order
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    async fn before_update(
        &self,
        _application: &mut Application,
        _tenant_domain: &str,
        _actor: &str,
    ) -> OrgshareResult<Flow> {
        self.log.lock().unwrap().push(self.order);
        Ok(Flow::Continue)
    }
}

/// Listener that rewrites the record and halts every update.
struct HaltingListener {
    order: u32,
}

#[async_trait]
impl ApplicationListener for HaltingListener {
    fn order(&self) -> u32 {
        self.order
    }

    async fn before_update(
        &self,
        application: &mut Application,
        _tenant_domain: &str,
        _actor: &str,
    ) -> OrgshareResult<Flow> {
        application.description = Some("halted".into());
        Ok(Flow::Halt)
    }
}

/// Shared-application directory whose queries always fail.
struct FailingSharedDirectory;

impl SharedApplicationDirectory for FailingSharedDirectory {
    async fn main_application_link(
        &self,
        _fragment_application_id: Uuid,
        _fragment_organization_id: Uuid,
    ) -> OrgshareResult<Option<SharedApplicationLink>> {
        Err(OrgshareError::Database("link store offline".into()))
    }

    async fn has_fragments(&self, _application_id: Uuid) -> OrgshareResult<bool> {
        Err(OrgshareError::Database("link store offline".into()))
    }
}

// -----------------------------------------------------------------------
// Listener framework tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn listeners_run_in_ascending_order() {
    let (mut service, applications) = setup().await;
    let log = Arc::new(Mutex::new(Vec::new()));

    // Registered out of order on purpose.
    for order in [90, 10, 50] {
        service.register_listener(Arc::new(RecordingListener {
            order,
            enabled: true,
            log: log.clone(),
        }));
    }

    let app = applications
        .create(sample_create("acme.com", "portal"))
        .await
        .unwrap();
    service
        .update_application(app, "acme.com", "admin@acme.com")
        .await
        .unwrap();

    assert_eq!(*log.lock().unwrap(), vec![10, 50, 90]);
}

#[tokio::test]
async fn disabled_listener_is_skipped() {
    let (mut service, applications) = setup().await;
    let log = Arc::new(Mutex::new(Vec::new()));

    service.register_listener(Arc::new(RecordingListener {
        order: 10,
        enabled: true,
        log: log.clone(),
    }));
    service.register_listener(Arc::new(RecordingListener {
        order: 20,
        enabled: false,
        log: log.clone(),
    }));

    let app = applications
        .create(sample_create("acme.com", "portal"))
        .await
        .unwrap();
    service
        .update_application(app, "acme.com", "admin@acme.com")
        .await
        .unwrap();

    assert_eq!(*log.lock().unwrap(), vec![10]);
}

#[tokio::test]
async fn halting_listener_skips_persistence() {
    let (mut service, applications) = setup().await;
    service.register_listener(Arc::new(HaltingListener { order: 10 }));

    let app = applications
        .create(sample_create("acme.com", "portal"))
        .await
        .unwrap();

    let mut proposed = app.clone();
    proposed.name = "renamed".into();
    let returned = service
        .update_application(proposed, "acme.com", "admin@acme.com")
        .await
        .unwrap();

    // The caller sees the listener's rewrite...
    assert_eq!(returned.description.as_deref(), Some("halted"));
    // ...but nothing was persisted.
    let stored = applications
        .get_by_resource_id(app.resource_id, "acme.com")
        .await
        .unwrap();
    assert_eq!(stored.name, "portal");
}

#[tokio::test]
async fn halt_stops_later_listeners() {
    let (mut service, applications) = setup().await;
    let log = Arc::new(Mutex::new(Vec::new()));

    service.register_listener(Arc::new(HaltingListener { order: 10 }));
    service.register_listener(Arc::new(RecordingListener {
        order: 20,
        enabled: true,
        log: log.clone(),
    }));

    let app = applications
        .create(sample_create("acme.com", "portal"))
        .await
        .unwrap();
    service
        .update_application(app, "acme.com", "admin@acme.com")
        .await
        .unwrap();

    assert!(log.lock().unwrap().is_empty());
}

// -----------------------------------------------------------------------
// Guard behavior when a collaborator fails
// -----------------------------------------------------------------------

#[tokio::test]
async fn delete_validation_failure_is_wrapped() {
    let db = mem_db().await;
    let applications = SurrealApplicationRepository::new(db.clone());
    let organizations = SurrealOrganizationDirectory::new(db);

    applications
        .create(sample_create("acme.com", "portal"))
        .await
        .unwrap();

    let guard = FragmentApplicationGuard::new(
        applications,
        organizations,
        FailingSharedDirectory,
        FragmentGuardConfig::default(),
    );

    let err = guard
        .before_delete("portal", "acme.com", "admin@acme.com", DeleteIntent::Direct)
        .await
        .unwrap_err();
    assert!(
        matches!(err, OrgshareError::DeleteValidation { .. }),
        "expected DeleteValidation, got: {err:?}"
    );
}

#[tokio::test]
async fn read_resolution_failure_is_wrapped() {
    let db = mem_db().await;
    let applications = SurrealApplicationRepository::new(db.clone());
    let organizations = SurrealOrganizationDirectory::new(db);

    organizations
        .add_organization(CreateOrganization {
            name: "ACME Corp".into(),
            tenant_domain: "acme.com".into(),
        })
        .await
        .unwrap();
    let mut fragment = applications
        .create(fragment_create("acme.com", "portal"))
        .await
        .unwrap();

    let guard = FragmentApplicationGuard::new(
        applications,
        organizations,
        FailingSharedDirectory,
        FragmentGuardConfig::default(),
    );

    let err = guard
        .after_get(&mut fragment, "portal", "acme.com")
        .await
        .unwrap_err();
    assert!(
        matches!(err, OrgshareError::FragmentResolution { .. }),
        "expected FragmentResolution, got: {err:?}"
    );
}
