//! Orgshare Core — domain models, collaborator traits, and the
//! application lifecycle listener contract.

pub mod error;
pub mod listener;
pub mod models;
pub mod repository;

pub use error::{OrgshareError, OrgshareResult};
pub use listener::{ApplicationListener, DeleteIntent, Flow};
