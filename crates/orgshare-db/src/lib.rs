//! Orgshare Database — SurrealDB connection management and
//! implementations of the core collaborator traits.
//!
//! This crate provides:
//! - Connection management ([`DbConfig`], [`connect`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Repository and directory implementations over SurrealDB
//! - Error types ([`DbError`])

mod connection;
mod error;
mod schema;

pub mod repository;

pub use connection::{DbConfig, connect};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
