//! Fragment guard configuration.

/// Configuration for the fragment application guard.
#[derive(Debug, Clone)]
pub struct FragmentGuardConfig {
    /// Whether the guard's hooks run at all. Enabled by default;
    /// disabling removes all fragment consistency enforcement.
    pub enabled: bool,
}

impl Default for FragmentGuardConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
