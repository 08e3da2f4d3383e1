//! Built-in knowledge sources and startup discovery.
//!
//! Discovery turns the `[plugins]` config section into a populated
//! [`SourceRegistry`]. It runs once, before the host starts taking requests.

pub mod test_docs;

use std::sync::Arc;

use knowflow_search::{KnowledgeSource, SourceDescriptor, SourceRegistry};

use crate::config::PluginSettings;
use crate::error::Result;

pub use test_docs::TestDocsSource;

/// Names of every built-in plugin.
pub const BUILTIN_PLUGINS: &[&str] = &[test_docs::ID];

/// Instantiate a built-in plugin by name.
pub fn builtin(name: &str) -> Option<(SourceDescriptor, Arc<dyn KnowledgeSource>)> {
    match name {
        test_docs::ID => Some((TestDocsSource::descriptor(), Arc::new(TestDocsSource))),
        _ => None,
    }
}

/// Build a registry containing every enabled built-in plugin.
///
/// Unknown names are logged and skipped.
///
/// # Errors
///
/// Returns [`SearchError::DuplicateSource`](knowflow_search::SearchError::DuplicateSource)
/// (wrapped) if the same plugin is enabled twice.
pub fn discover(settings: &PluginSettings) -> Result<SourceRegistry> {
    let mut registry = SourceRegistry::new();
    for name in &settings.enabled {
        match builtin(name) {
            Some((descriptor, source)) => registry.register(descriptor, source)?,
            None => tracing::warn!(plugin = %name, "unknown plugin; skipping"),
        }
    }
    tracing::info!(count = registry.len(), "plugin discovery completed");
    Ok(registry)
}
