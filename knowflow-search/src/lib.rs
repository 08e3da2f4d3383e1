//! # knowflow-search
//!
//! Federated search across pluggable knowledge sources.
//!
//! A single query is fanned out concurrently to every available
//! [`KnowledgeSource`], each result is tagged with the id of the source that
//! produced it, results from a caller-preferred source get a fixed score
//! boost, and everything is merged into one ranked, capped
//! [`SearchResponse`].
//!
//! ## Design
//!
//! - Sources are opaque capabilities behind an object-safe async trait
//! - The [`SourceRegistry`] is built explicitly and shared read-only
//! - Graceful degradation: unavailable, failing, or slow sources contribute
//!   nothing, but never fail the query
//! - No state is kept between queries
//!
//! ## Example
//!
//! ```no_run
//! # use std::sync::Arc;
//! # async fn example(docs: Arc<dyn knowflow_search::KnowledgeSource>) -> knowflow_search::Result<()> {
//! use knowflow_search::{KnowledgeService, SourceDescriptor, SourceRegistry};
//!
//! let mut registry = SourceRegistry::new();
//! registry.register(
//!     SourceDescriptor::new("docs", "Docs", "Architecture notes"),
//!     docs,
//! )?;
//!
//! let service = KnowledgeService::with_defaults(Arc::new(registry));
//! let response = service.search("monorepo", Some("docs"), 3).await?;
//! for result in &response.results {
//!     println!("{:?}: {}", result.source(), result.content);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod registry;
pub mod service;
pub mod source;
pub mod types;

pub use config::AggregatorConfig;
pub use error::{Result, SearchError};
pub use orchestrator::scoring::PREFERRED_SOURCE_BOOST;
pub use orchestrator::search::{AggregateOutcome, SourceFailure};
pub use registry::{RegisteredSource, SourceRegistry};
pub use service::KnowledgeService;
pub use source::KnowledgeSource;
pub use types::{ResultSnippet, SearchResponse, SnippetMetadata, SourceDescriptor, INSTRUCTIONS};
