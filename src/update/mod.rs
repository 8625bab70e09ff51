//! Update capability of the running build
//!
//! The update checker itself lives elsewhere; the options page only needs to
//! know whether automatic update checks exist in this distribution at all.

/// Reports whether automatic program update checks are available
pub trait UpdateCapability: Send + Sync {
    fn auto_update_enabled(&self) -> bool;
}

/// Capability decided at build time by the `autoupdate` cargo feature
///
/// Distributions that ship through a package manager build without it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildUpdateCapability;

impl UpdateCapability for BuildUpdateCapability {
    fn auto_update_enabled(&self) -> bool {
        cfg!(feature = "autoupdate")
    }
}

/// Fixed capability, for hosts that decide at runtime
#[derive(Debug, Clone, Copy)]
pub struct StaticUpdateCapability(pub bool);

impl UpdateCapability for StaticUpdateCapability {
    fn auto_update_enabled(&self) -> bool {
        self.0
    }
}

/// Get the current version of this binary
pub fn current_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
