//! Orgshare Mgt — application lifecycle service and the fragment
//! application guard.

pub mod config;
pub mod guard;
pub mod service;

pub use config::FragmentGuardConfig;
pub use guard::{FRAGMENT_GUARD_ORDER, FragmentApplicationGuard};
pub use service::ApplicationService;
