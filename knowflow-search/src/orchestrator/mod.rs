//! Search orchestrator: concurrent fan-out, tagging, boosting, ranking.
//!
//! This module fans a query out to every available source concurrently,
//! tags each result with its source, applies the preferred-source boost,
//! and returns a sorted, truncated result set.

pub mod scoring;
pub mod search;
