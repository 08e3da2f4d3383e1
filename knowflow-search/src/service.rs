//! The aggregation service: the single entry point callers use.

use std::sync::Arc;

use crate::config::AggregatorConfig;
use crate::error::Result;
use crate::orchestrator::search::{fan_out, AggregateOutcome};
use crate::registry::SourceRegistry;
use crate::types::{SearchResponse, SourceDescriptor};

/// Coordinates searches across every registered knowledge source.
///
/// The service owns a shared handle to an explicitly built
/// [`SourceRegistry`]; there is no process-wide registry. Each call to
/// [`search`](Self::search) is an independent fan-out with no state carried
/// over from previous queries.
#[derive(Debug, Clone)]
pub struct KnowledgeService {
    registry: Arc<SourceRegistry>,
    config: AggregatorConfig,
}

impl KnowledgeService {
    /// Create a service over `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`](crate::SearchError::Config) if
    /// `config` does not validate.
    pub fn new(registry: Arc<SourceRegistry>, config: AggregatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    /// Create a service with [`AggregatorConfig::default()`].
    pub fn with_defaults(registry: Arc<SourceRegistry>) -> Self {
        Self {
            registry,
            config: AggregatorConfig::default(),
        }
    }

    /// The registry this service searches.
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// The active configuration.
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Search every available source and return the merged, capped envelope.
    ///
    /// Results from `preferred_source` receive a fixed `+0.2` boost (capped
    /// at `1.0`). Sources that are unavailable, fail, or time out are left
    /// out silently; if none are available the envelope is simply empty.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`](crate::SearchError::InvalidRequest)
    /// when `limit` is zero. No source is contacted in that case. Limits above
    /// the configured maximum are clamped to it.
    pub async fn search(
        &self,
        query: &str,
        preferred_source: Option<&str>,
        limit: usize,
    ) -> Result<SearchResponse> {
        let outcome = self.search_detailed(query, preferred_source, limit).await?;
        Ok(SearchResponse::new(outcome.results))
    }

    /// Like [`search`](Self::search), but also returns which sources were
    /// consulted and which ones failed.
    ///
    /// # Errors
    ///
    /// Same as [`search`](Self::search).
    pub async fn search_detailed(
        &self,
        query: &str,
        preferred_source: Option<&str>,
        limit: usize,
    ) -> Result<AggregateOutcome> {
        let limit = self.config.check_limit(limit)?;
        tracing::debug!(
            preferred = preferred_source.unwrap_or("none"),
            limit,
            "knowledge search requested"
        );
        tracing::trace!(query, "knowledge search query");

        let sources = self.registry.available(self.config.source_timeout()).await;
        tracing::debug!(count = sources.len(), "searching available sources");

        let outcome = fan_out(
            &sources,
            query,
            preferred_source,
            limit,
            self.config.source_timeout(),
        )
        .await;

        tracing::debug!(
            returned = outcome.results.len(),
            failed = outcome.failures.len(),
            "knowledge search complete"
        );
        Ok(outcome)
    }

    /// Identity of every currently available source, in registration order.
    pub async fn available_sources(&self) -> Vec<SourceDescriptor> {
        self.registry
            .available(self.config.source_timeout())
            .await
            .into_iter()
            .map(|entry| entry.descriptor)
            .collect()
    }
}
