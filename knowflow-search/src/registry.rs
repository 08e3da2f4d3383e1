//! In-memory catalogue of knowledge sources keyed by identifier.
//!
//! The registry is filled once at startup through [`SourceRegistry::register`]
//! (which needs `&mut self`) and then shared read-only behind an `Arc` for the
//! rest of the process, so lookups during queries need no locking.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Result, SearchError};
use crate::source::KnowledgeSource;
use crate::types::SourceDescriptor;

/// A registered source: its static identity plus the capability itself.
#[derive(Clone)]
pub struct RegisteredSource {
    /// Static identity.
    pub descriptor: SourceDescriptor,
    /// The capability used for probing and searching.
    pub source: Arc<dyn KnowledgeSource>,
}

impl RegisteredSource {
    /// Shorthand for `descriptor.id`.
    pub fn id(&self) -> &str {
        &self.descriptor.id
    }
}

impl fmt::Debug for RegisteredSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredSource")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Registry of knowledge sources in registration order.
///
/// Entries are never removed once added.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    sources: Vec<RegisteredSource>,
    index: HashMap<String, usize>,
}

impl SourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source under `descriptor.id`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::DuplicateSource`] if the identifier is already
    /// taken. The existing entry is left untouched.
    pub fn register(
        &mut self,
        descriptor: SourceDescriptor,
        source: Arc<dyn KnowledgeSource>,
    ) -> Result<()> {
        if self.index.contains_key(&descriptor.id) {
            return Err(SearchError::DuplicateSource(descriptor.id));
        }
        tracing::info!(id = %descriptor.id, name = %descriptor.name, "registered knowledge source");
        self.index.insert(descriptor.id.clone(), self.sources.len());
        self.sources.push(RegisteredSource { descriptor, source });
        Ok(())
    }

    /// Look up a source's capability by identifier.
    pub fn get(&self, id: &str) -> Option<Arc<dyn KnowledgeSource>> {
        self.entry(id).map(|entry| Arc::clone(&entry.source))
    }

    /// Look up a source's descriptor by identifier.
    pub fn descriptor(&self, id: &str) -> Option<&SourceDescriptor> {
        self.entry(id).map(|entry| &entry.descriptor)
    }

    /// Whether a source with this identifier is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Every registered source, regardless of availability, in registration order.
    pub fn all(&self) -> &[RegisteredSource] {
        &self.sources
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no sources are registered.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Probe every source concurrently and return those that report ready.
    ///
    /// Each probe is bounded by `probe_timeout`. A probe that errors or runs
    /// out of time is logged and counts as "not available"; it never aborts
    /// or stalls the scan. The result keeps registration order.
    pub async fn available(&self, probe_timeout: Duration) -> Vec<RegisteredSource> {
        let probes = self.sources.iter().map(|entry| async move {
            match tokio::time::timeout(probe_timeout, entry.source.is_available()).await {
                Ok(Ok(ready)) => ready,
                Ok(Err(err)) => {
                    tracing::warn!(source = %entry.id(), error = %err, "availability probe failed");
                    false
                }
                Err(_) => {
                    tracing::warn!(
                        source = %entry.id(),
                        timeout_ms = u64::try_from(probe_timeout.as_millis()).unwrap_or(u64::MAX),
                        "availability probe timed out"
                    );
                    false
                }
            }
        });

        let outcomes = futures::future::join_all(probes).await;

        self.sources
            .iter()
            .zip(outcomes)
            .filter(|(_, ready)| *ready)
            .map(|(entry, _)| entry.clone())
            .collect()
    }

    fn entry(&self, id: &str) -> Option<&RegisteredSource> {
        self.index.get(id).and_then(|&i| self.sources.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResultSnippet;
    use async_trait::async_trait;

    const PROBE_TIMEOUT: Duration = Duration::from_millis(100);

    enum Probe {
        Ready,
        NotReady,
        Broken,
        Stuck,
    }

    struct ProbeSource(Probe);

    #[async_trait]
    impl KnowledgeSource for ProbeSource {
        async fn is_available(&self) -> Result<bool> {
            match self.0 {
                Probe::Ready => Ok(true),
                Probe::NotReady => Ok(false),
                Probe::Broken => Err(SearchError::unavailable("broken", "probe exploded")),
                Probe::Stuck => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(true)
                }
            }
        }

        async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<ResultSnippet>> {
            Ok(vec![])
        }
    }

    fn descriptor(id: &str) -> SourceDescriptor {
        SourceDescriptor::new(id, format!("{id} name"), format!("{id} description"))
    }

    fn registry_with(entries: Vec<(&str, Probe)>) -> SourceRegistry {
        let mut registry = SourceRegistry::new();
        for (id, probe) in entries {
            registry
                .register(descriptor(id), Arc::new(ProbeSource(probe)))
                .expect("distinct ids");
        }
        registry
    }

    #[test]
    fn all_returns_registration_order() {
        let registry = registry_with(vec![
            ("docs", Probe::Ready),
            ("jira", Probe::Ready),
            ("slack", Probe::Ready),
        ]);
        let ids: Vec<&str> = registry.all().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["docs", "jira", "slack"]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn duplicate_registration_fails_and_keeps_original() {
        let mut registry = SourceRegistry::new();
        let first = SourceDescriptor::new("docs", "Original", "first");
        registry
            .register(first.clone(), Arc::new(ProbeSource(Probe::Ready)))
            .expect("first registration");

        let second = SourceDescriptor::new("docs", "Impostor", "second");
        let err = registry
            .register(second, Arc::new(ProbeSource(Probe::Broken)))
            .unwrap_err();

        assert!(matches!(err, SearchError::DuplicateSource(ref id) if id == "docs"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.descriptor("docs"), Some(&first));
    }

    #[test]
    fn get_returns_none_for_unknown_id() {
        let registry = registry_with(vec![("docs", Probe::Ready)]);
        assert!(registry.get("docs").is_some());
        assert!(registry.get("jira").is_none());
        assert!(registry.contains("docs"));
        assert!(!registry.contains("jira"));
    }

    #[test]
    fn empty_registry() {
        let registry = SourceRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.all().is_empty());
    }

    #[tokio::test]
    async fn available_filters_not_ready_and_broken_probes() {
        let registry = registry_with(vec![
            ("docs", Probe::Ready),
            ("jira", Probe::NotReady),
            ("slack", Probe::Broken),
            ("notes", Probe::Ready),
        ]);
        let available = registry.available(PROBE_TIMEOUT).await;
        let ids: Vec<&str> = available.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["docs", "notes"]);
    }

    #[tokio::test]
    async fn available_on_empty_registry_is_empty() {
        let registry = SourceRegistry::new();
        assert!(registry.available(PROBE_TIMEOUT).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stuck_probe_is_dropped_after_timeout() {
        let registry = registry_with(vec![("docs", Probe::Ready), ("stuck", Probe::Stuck)]);
        let available = registry.available(PROBE_TIMEOUT).await;
        let ids: Vec<&str> = available.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["docs"]);
    }
}
