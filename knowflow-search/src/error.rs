//! Error types for the knowflow-search crate.
//!
//! Only [`SearchError::InvalidRequest`] and [`SearchError::Config`] ever
//! cross the service boundary. The per-source variants are produced while
//! fanning out and are absorbed by the orchestrator, which records them as
//! diagnostics instead of failing the query.

/// Stable error codes for programmatic error handling.
///
/// These appear in the `error` field of tool error payloads and never change.
pub mod error_codes {
    /// A source with the same identifier is already registered.
    pub const DUPLICATE_SOURCE: &str = "DUPLICATE_SOURCE";

    /// A source failed its availability probe.
    pub const SOURCE_UNAVAILABLE: &str = "SOURCE_UNAVAILABLE";

    /// A source's search call failed.
    pub const SOURCE_SEARCH_FAILED: &str = "SOURCE_SEARCH_FAILED";

    /// A source did not answer within the per-source timeout.
    pub const SOURCE_TIMEOUT: &str = "SOURCE_TIMEOUT";

    /// The caller sent a structurally invalid request.
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";

    /// Invalid aggregator configuration.
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";
}

/// Errors that can occur while registering sources or aggregating a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A source with this identifier has already been registered.
    #[error("duplicate source: a source with id \"{0}\" is already registered")]
    DuplicateSource(String),

    /// The source's availability probe failed or reported not ready.
    #[error("source {source_id} unavailable: {reason}")]
    SourceUnavailable {
        /// Identifier of the source.
        source_id: String,
        /// What went wrong.
        reason: String,
    },

    /// The source's search call returned an error.
    #[error("source {source_id} search failed: {reason}")]
    SourceSearch {
        /// Identifier of the source.
        source_id: String,
        /// What went wrong.
        reason: String,
    },

    /// The source did not respond within the configured timeout.
    #[error("source {source_id} timed out after {timeout_ms}ms")]
    SourceTimeout {
        /// Identifier of the source.
        source_id: String,
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// The request was rejected before any source was contacted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid aggregator configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Returns the stable error code for this variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateSource(_) => error_codes::DUPLICATE_SOURCE,
            Self::SourceUnavailable { .. } => error_codes::SOURCE_UNAVAILABLE,
            Self::SourceSearch { .. } => error_codes::SOURCE_SEARCH_FAILED,
            Self::SourceTimeout { .. } => error_codes::SOURCE_TIMEOUT,
            Self::InvalidRequest(_) => error_codes::INVALID_REQUEST,
            Self::Config(_) => error_codes::CONFIG_INVALID,
        }
    }

    /// Convenience constructor for plugin implementations reporting a failed search.
    pub fn search_failed(source_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceSearch {
            source_id: source_id.into(),
            reason: reason.into(),
        }
    }

    /// Convenience constructor for a failed or negative availability probe.
    pub fn unavailable(source_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_id: source_id.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is scoped to a single source and therefore absorbed
    /// during aggregation rather than returned to the caller.
    pub fn is_source_scoped(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable { .. } | Self::SourceSearch { .. } | Self::SourceTimeout { .. }
        )
    }
}

/// Convenience type alias for knowflow-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
