//! Core fan-out: query every available source concurrently, tag, boost, merge, rank.
//!
//! Each source is queried independently. A source that fails its
//! availability re-check, errors, or exceeds the timeout contributes zero
//! snippets and is recorded as a [`SourceFailure`]; it never fails the
//! aggregate and is never retried within the same call.

use std::time::Duration;

use crate::error::{Result, SearchError};
use crate::registry::RegisteredSource;
use crate::types::ResultSnippet;

use super::scoring::{rank, tag_results};

/// A source that contributed nothing to a query, and why.
#[derive(Debug)]
pub struct SourceFailure {
    /// Identifier of the failing source.
    pub source_id: String,
    /// The absorbed error.
    pub error: SearchError,
}

/// Result of one fan-out: the ranked snippets plus diagnostics.
#[derive(Debug, Default)]
pub struct AggregateOutcome {
    /// Merged, sorted and truncated results.
    pub results: Vec<ResultSnippet>,
    /// Sources that were consulted, in registration order.
    pub consulted: Vec<String>,
    /// Sources that contributed nothing because they failed.
    pub failures: Vec<SourceFailure>,
}

/// Fan a query out to `sources` and merge their results.
///
/// # Pipeline
///
/// 1. Query every source concurrently with [`futures::future::join_all`],
///    each bounded by `timeout` and asked for the full `limit`
/// 2. Log per-source failures at warn level; keep successful results
/// 3. Tag each result with its source id and apply the preferred boost
/// 4. Concatenate in source order
/// 5. Stable sort by score (descending) and truncate to `limit`
pub async fn fan_out(
    sources: &[RegisteredSource],
    query: &str,
    preferred: Option<&str>,
    limit: usize,
    timeout: Duration,
) -> AggregateOutcome {
    let futures = sources.iter().map(|entry| async move {
        let outcome = query_source(entry, query, limit, timeout).await;
        (entry.id(), outcome)
    });

    let outcomes = futures::future::join_all(futures).await;

    let mut merged: Vec<ResultSnippet> = Vec::new();
    let mut consulted = Vec::with_capacity(sources.len());
    let mut failures = Vec::new();

    for (source_id, outcome) in outcomes {
        consulted.push(source_id.to_string());
        match outcome {
            Ok(results) => {
                let count = results.len();
                tracing::debug!(source = %source_id, count, "source returned results");
                merged.extend(tag_results(results, source_id, preferred));
            }
            Err(error) => {
                tracing::warn!(source = %source_id, error = %error, "source query failed");
                failures.push(SourceFailure {
                    source_id: source_id.to_string(),
                    error,
                });
            }
        }
    }

    tracing::debug!(
        total = merged.len(),
        failed = failures.len(),
        "merged results from all sources"
    );

    AggregateOutcome {
        results: rank(merged, limit),
        consulted,
        failures,
    }
}

/// Re-check availability, then search a single source within `timeout`.
async fn query_source(
    entry: &RegisteredSource,
    query: &str,
    limit: usize,
    timeout: Duration,
) -> Result<Vec<ResultSnippet>> {
    let id = entry.id();
    let attempt = async {
        let ready = entry
            .source
            .is_available()
            .await
            .map_err(|e| scoped(e, |reason| SearchError::unavailable(id, reason)))?;
        if !ready {
            return Err(SearchError::unavailable(
                id,
                "became unavailable before search",
            ));
        }
        tracing::trace!(source = %id, query, limit, "searching source");
        entry
            .source
            .search(query, limit)
            .await
            .map_err(|e| scoped(e, |reason| SearchError::search_failed(id, reason)))
    };

    match tokio::time::timeout(timeout, attempt).await {
        Ok(outcome) => outcome,
        Err(_) => Err(SearchError::SourceTimeout {
            source_id: id.to_string(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

/// Keep source-scoped errors as they are; wrap anything else so it cannot
/// be mistaken for a caller-facing error.
fn scoped(err: SearchError, wrap: impl FnOnce(String) -> SearchError) -> SearchError {
    if err.is_source_scoped() {
        err
    } else {
        wrap(err.to_string())
    }
}
