//! Startup wiring: config → discovery → service → tool.
//!
//! Everything here runs once, before the host begins handling requests, so
//! the registry is complete and immutable by the time queries arrive.

use std::sync::Arc;

use knowflow_search::{KnowledgeService, SourceRegistry};

use crate::config::KnowflowConfig;
use crate::error::{KnowflowError, Result};
use crate::plugins;
use crate::tool::SearchKnowledgeTool;

/// Build the service over an already-populated registry.
///
/// # Errors
///
/// Returns [`KnowflowError::Config`] if the search settings are invalid.
pub fn build_service(
    config: &KnowflowConfig,
    registry: SourceRegistry,
) -> Result<KnowledgeService> {
    KnowledgeService::new(Arc::new(registry), config.search.to_aggregator_config())
        .map_err(|e| KnowflowError::Config(e.to_string()))
}

/// Validate `config`, discover plugins, and assemble the search tool.
///
/// # Errors
///
/// Fails on invalid configuration or a duplicate plugin id.
pub fn initialize(config: &KnowflowConfig) -> Result<SearchKnowledgeTool> {
    config.validate()?;
    let registry = plugins::discover(&config.plugins)?;
    if registry.is_empty() {
        tracing::warn!("no knowledge sources registered; every search will be empty");
    }
    let service = build_service(config, registry)?;
    tracing::info!(
        sources = service.registry().len(),
        default_limit = config.search.default_limit,
        "knowledge service ready"
    );
    Ok(SearchKnowledgeTool::new(service))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn default_config_initializes_with_docs() {
        let tool = initialize(&KnowflowConfig::default()).unwrap();
        assert!(tool.service().registry().contains("docs"));
        assert_eq!(tool.service().config().default_limit, 3);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = KnowflowConfig::default();
        config.search.default_limit = 0;
        assert!(matches!(initialize(&config), Err(KnowflowError::Config(_))));
    }

    #[test]
    fn search_settings_flow_into_service() {
        let mut config = KnowflowConfig::default();
        config.search.source_timeout_ms = 1234;
        let tool = initialize(&config).unwrap();
        assert_eq!(tool.service().config().source_timeout_ms, 1234);
    }
}
