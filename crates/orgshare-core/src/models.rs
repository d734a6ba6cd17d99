//! Domain models for Orgshare.
//!
//! These are the core types shared across all crates.

pub mod application;
pub mod organization;
pub mod sharing;
