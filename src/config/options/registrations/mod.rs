//! Registration of all application options

pub mod general;

use super::OptionsRegistry;
use anyhow::Result;
use std::sync::Arc;

/// Register all options from all pages
pub fn register_all(registry: &mut OptionsRegistry) -> Result<()> {
    general::register(registry)?;
    Ok(())
}

/// Build a shared registry with every option declared
pub fn build_registry() -> Result<Arc<OptionsRegistry>> {
    let mut registry = OptionsRegistry::new();
    register_all(&mut registry)?;
    log::debug!("Initialized options registry with {} options", registry.count());
    Ok(Arc::new(registry))
}
