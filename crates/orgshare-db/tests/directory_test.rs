//! Integration tests for the organization and shared-application
//! directory implementations using in-memory SurrealDB.

use orgshare_core::error::OrgshareError;
use orgshare_core::models::organization::CreateOrganization;
use orgshare_core::models::sharing::SharedApplicationLink;
use orgshare_core::repository::{OrganizationDirectory, SharedApplicationDirectory};
use orgshare_db::repository::{SurrealOrganizationDirectory, SurrealSharedApplicationDirectory};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    orgshare_db::run_migrations(&db).await.unwrap();
    db
}

fn link(
    main_app: Uuid,
    main_org: Uuid,
    fragment_app: Uuid,
    fragment_org: Uuid,
) -> SharedApplicationLink {
    SharedApplicationLink {
        main_application_id: main_app,
        main_organization_id: main_org,
        fragment_application_id: fragment_app,
        fragment_organization_id: fragment_org,
    }
}

// -----------------------------------------------------------------------
// Organization directory tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn register_and_resolve_organization() {
    let db = setup().await;
    let dir = SurrealOrganizationDirectory::new(db);

    let org = dir
        .add_organization(CreateOrganization {
            name: "ACME Corp".into(),
            tenant_domain: "acme.com".into(),
        })
        .await
        .unwrap();

    assert_eq!(org.name, "ACME Corp");
    assert_eq!(org.tenant_domain, "acme.com");

    let id = dir.resolve_organization_id("acme.com").await.unwrap();
    assert_eq!(id, org.id);

    let tenant_domain = dir.resolve_tenant_domain(org.id).await.unwrap();
    assert_eq!(tenant_domain, "acme.com");
}

#[tokio::test]
async fn resolve_unknown_tenant_domain() {
    let db = setup().await;
    let dir = SurrealOrganizationDirectory::new(db);

    let err = dir.resolve_organization_id("ghost.com").await.unwrap_err();
    assert!(
        matches!(err, OrgshareError::OrganizationNotFound { .. }),
        "expected OrganizationNotFound, got: {err:?}"
    );
}

#[tokio::test]
async fn resolve_unknown_organization_id() {
    let db = setup().await;
    let dir = SurrealOrganizationDirectory::new(db);

    let err = dir.resolve_tenant_domain(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, OrgshareError::OrganizationNotFound { .. }));
}

#[tokio::test]
async fn duplicate_tenant_domain_rejected() {
    let db = setup().await;
    let dir = SurrealOrganizationDirectory::new(db);

    dir.add_organization(CreateOrganization {
        name: "ACME Corp".into(),
        tenant_domain: "acme.com".into(),
    })
    .await
    .unwrap();

    let result = dir
        .add_organization(CreateOrganization {
            name: "Impostor".into(),
            tenant_domain: "acme.com".into(),
        })
        .await;
    assert!(result.is_err(), "tenant domains are unique");
}

// -----------------------------------------------------------------------
// Shared-application directory tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn link_round_trip() {
    let db = setup().await;
    let dir = SurrealSharedApplicationDirectory::new(db);

    let main_app = Uuid::new_v4();
    let main_org = Uuid::new_v4();
    let fragment_app = Uuid::new_v4();
    let fragment_org = Uuid::new_v4();

    dir.add_link(link(main_app, main_org, fragment_app, fragment_org))
        .await
        .unwrap();

    let found = dir
        .main_application_link(fragment_app, fragment_org)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.main_application_id, main_app);
    assert_eq!(found.main_organization_id, main_org);
    assert_eq!(found.fragment_application_id, fragment_app);
    assert_eq!(found.fragment_organization_id, fragment_org);
}

#[tokio::test]
async fn missing_link_is_none() {
    let db = setup().await;
    let dir = SurrealSharedApplicationDirectory::new(db);

    let found = dir
        .main_application_link(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn has_fragments_tracks_links() {
    let db = setup().await;
    let dir = SurrealSharedApplicationDirectory::new(db);

    let main_app = Uuid::new_v4();
    let fragment_app = Uuid::new_v4();
    let fragment_org = Uuid::new_v4();

    assert!(!dir.has_fragments(main_app).await.unwrap());

    dir.add_link(link(main_app, Uuid::new_v4(), fragment_app, fragment_org))
        .await
        .unwrap();
    assert!(dir.has_fragments(main_app).await.unwrap());

    dir.remove_link(fragment_app, fragment_org).await.unwrap();
    assert!(!dir.has_fragments(main_app).await.unwrap());
}

#[tokio::test]
async fn many_fragments_per_main() {
    let db = setup().await;
    let dir = SurrealSharedApplicationDirectory::new(db);

    let main_app = Uuid::new_v4();
    let main_org = Uuid::new_v4();
    let first_fragment = Uuid::new_v4();
    let first_org = Uuid::new_v4();
    let second_fragment = Uuid::new_v4();
    let second_org = Uuid::new_v4();

    dir.add_link(link(main_app, main_org, first_fragment, first_org))
        .await
        .unwrap();
    dir.add_link(link(main_app, main_org, second_fragment, second_org))
        .await
        .unwrap();

    assert!(dir.has_fragments(main_app).await.unwrap());

    // Each fragment resolves its own link.
    let first = dir
        .main_application_link(first_fragment, first_org)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.fragment_application_id, first_fragment);

    let second = dir
        .main_application_link(second_fragment, second_org)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.fragment_application_id, second_fragment);
}

#[tokio::test]
async fn one_main_per_fragment() {
    let db = setup().await;
    let dir = SurrealSharedApplicationDirectory::new(db);

    let fragment_app = Uuid::new_v4();
    let fragment_org = Uuid::new_v4();

    dir.add_link(link(
        Uuid::new_v4(),
        Uuid::new_v4(),
        fragment_app,
        fragment_org,
    ))
    .await
    .unwrap();

    let result = dir
        .add_link(link(
            Uuid::new_v4(),
            Uuid::new_v4(),
            fragment_app,
            fragment_org,
        ))
        .await;
    assert!(
        result.is_err(),
        "a fragment links to exactly one main application"
    );
}
