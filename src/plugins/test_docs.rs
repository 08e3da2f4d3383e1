//! Fixed-content documentation source used to exercise the plugin pipeline.

use async_trait::async_trait;
use knowflow_search::{KnowledgeSource, ResultSnippet, SourceDescriptor};

/// Identifier under which this source registers.
pub const ID: &str = "docs";

/// A documentation source that always answers with the same two snippets.
///
/// The second snippet echoes the query so callers can see it round-trip.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestDocsSource;

impl TestDocsSource {
    /// Static identity of this source.
    pub fn descriptor() -> SourceDescriptor {
        SourceDescriptor::new(
            ID,
            "Test Documentation",
            "For architecture documents, technical specifications, and notes",
        )
    }
}

#[async_trait]
impl KnowledgeSource for TestDocsSource {
    async fn is_available(&self) -> knowflow_search::Result<bool> {
        Ok(true)
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> knowflow_search::Result<Vec<ResultSnippet>> {
        tracing::trace!(query, limit, "test docs search");
        let results = vec![
            ResultSnippet::new(
                "We agreed to consolidate all backend modules under a single monorepo using Nx.",
                "architecture-notes.md",
                "2024-03-14",
                0.95,
            ),
            ResultSnippet::new(
                format!(
                    "This is relevant information for your query: \"{query}\". The team decided to use TypeScript for all new microservices."
                ),
                "tech-stack-decisions.md",
                "2024-03-20",
                0.87,
            ),
        ];
        Ok(results.into_iter().take(limit).collect())
    }
}
