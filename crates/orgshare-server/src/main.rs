//! Orgshare Server — application entry point.

use std::sync::Arc;

use orgshare_db::DbConfig;
use orgshare_db::repository::{
    SurrealApplicationRepository, SurrealOrganizationDirectory, SurrealSharedApplicationDirectory,
};
use orgshare_mgt::{ApplicationService, FragmentApplicationGuard, FragmentGuardConfig};
use tracing_subscriber::EnvFilter;

fn db_config_from_env() -> DbConfig {
    let defaults = DbConfig::default();
    DbConfig {
        url: std::env::var("ORGSHARE_DB_URL").unwrap_or(defaults.url),
        namespace: std::env::var("ORGSHARE_DB_NAMESPACE").unwrap_or(defaults.namespace),
        database: std::env::var("ORGSHARE_DB_DATABASE").unwrap_or(defaults.database),
        username: std::env::var("ORGSHARE_DB_USERNAME").unwrap_or(defaults.username),
        password: std::env::var("ORGSHARE_DB_PASSWORD").unwrap_or(defaults.password),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("orgshare=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting Orgshare server...");

    let config = db_config_from_env();
    let db = match orgshare_db::connect(&config).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to SurrealDB");
            std::process::exit(1);
        }
    };

    if let Err(e) = orgshare_db::run_migrations(&db).await {
        tracing::error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }

    let guard = FragmentApplicationGuard::new(
        SurrealApplicationRepository::new(db.clone()),
        SurrealOrganizationDirectory::new(db.clone()),
        SurrealSharedApplicationDirectory::new(db.clone()),
        FragmentGuardConfig::default(),
    );

    let mut service = ApplicationService::new(SurrealApplicationRepository::new(db));
    service.register_listener(Arc::new(guard));

    tracing::info!("Orgshare server ready");

    // TODO: Start REST API server exposing the application service

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }

    tracing::info!("Orgshare server stopped.");
}
