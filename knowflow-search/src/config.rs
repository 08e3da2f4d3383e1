//! Aggregator configuration with sensible defaults.
//!
//! [`AggregatorConfig`] controls the default and maximum result limits and
//! how long a single source may take before it is dropped from a query.

use std::time::Duration;

use crate::error::SearchError;

/// Configuration for the aggregation service.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Limit applied when the caller does not specify one.
    pub default_limit: usize,
    /// Ceiling applied to caller-requested limits; larger requests are
    /// clamped to it.
    pub max_limit: usize,
    /// Per-source budget in milliseconds for the availability re-check plus
    /// the search call. A source that exceeds it contributes nothing.
    pub source_timeout_ms: u64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            default_limit: 3,
            max_limit: 50,
            source_timeout_ms: 8_000,
        }
    }
}

impl AggregatorConfig {
    /// The per-source timeout as a [`Duration`].
    pub fn source_timeout(&self) -> Duration {
        Duration::from_millis(self.source_timeout_ms)
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `default_limit` must be greater than 0
    /// - `max_limit` must be >= `default_limit`
    /// - `source_timeout_ms` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.default_limit == 0 {
            return Err(SearchError::Config(
                "default_limit must be greater than 0".into(),
            ));
        }
        if self.max_limit < self.default_limit {
            return Err(SearchError::Config(
                "max_limit must be >= default_limit".into(),
            ));
        }
        if self.source_timeout_ms == 0 {
            return Err(SearchError::Config(
                "source_timeout_ms must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Check a caller-requested limit and return the effective one.
    ///
    /// Limits above `max_limit` are clamped to it.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] if `limit` is zero.
    pub fn check_limit(&self, limit: usize) -> Result<usize, SearchError> {
        if limit == 0 {
            return Err(SearchError::InvalidRequest(
                "limit must be a positive integer".into(),
            ));
        }
        if limit > self.max_limit {
            tracing::debug!(
                requested = limit,
                max_limit = self.max_limit,
                "clamping limit to max_limit"
            );
            return Ok(self.max_limit);
        }
        Ok(limit)
    }
}
