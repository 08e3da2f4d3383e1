//! Trait definition for pluggable knowledge sources.
//!
//! Each knowledge backend (documentation, tickets, chat history...)
//! implements [`KnowledgeSource`] to expose a readiness probe and a scored
//! search. How a source finds and scores its matches is entirely its own
//! business; the aggregator only sees the snippets it returns.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ResultSnippet;

/// A pluggable knowledge source.
///
/// Sources are held as `Arc<dyn KnowledgeSource>` inside the
/// [`SourceRegistry`](crate::registry::SourceRegistry) and called
/// concurrently, so implementations must be `Send + Sync`.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Report whether the source is configured and ready to answer queries.
    ///
    /// # Errors
    ///
    /// An error is treated exactly like `Ok(false)`: the source is skipped
    /// for the current query and the error is logged.
    async fn is_available(&self) -> Result<bool>;

    /// Return up to `limit` snippets matching `query`.
    ///
    /// Implementations should leave [`SnippetMetadata::source`] unset and
    /// keep scores within `[0, 1]`.
    ///
    /// [`SnippetMetadata::source`]: crate::types::SnippetMetadata::source
    ///
    /// # Errors
    ///
    /// Any error makes this source contribute nothing to the current query.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ResultSnippet>>;
}
