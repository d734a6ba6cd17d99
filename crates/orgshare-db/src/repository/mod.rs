//! SurrealDB repository and directory implementations.

mod application;
mod organization;
mod shared;

pub use application::SurrealApplicationRepository;
pub use organization::SurrealOrganizationDirectory;
pub use shared::SurrealSharedApplicationDirectory;
