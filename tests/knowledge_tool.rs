//! End-to-end tests for the `search_knowledge` tool over mock sources.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use async_trait::async_trait;
use knowflow::SearchKnowledgeTool;
use knowflow::plugins::TestDocsSource;
use knowflow_search::{
    KnowledgeService, KnowledgeSource, ResultSnippet, SearchError, SourceDescriptor,
    SourceRegistry,
};
use serde_json::{Value, json};

struct NotesSource;

#[async_trait]
impl KnowledgeSource for NotesSource {
    async fn is_available(&self) -> knowflow_search::Result<bool> {
        Ok(true)
    }

    async fn search(
        &self,
        _query: &str,
        limit: usize,
    ) -> knowflow_search::Result<Vec<ResultSnippet>> {
        let results = vec![ResultSnippet::new(
            "Standup: migrate CI to the monorepo by Friday.",
            "standup-2024-03-18.md",
            "2024-03-18",
            0.90,
        )];
        Ok(results.into_iter().take(limit).collect())
    }
}

struct FlakySource;

#[async_trait]
impl KnowledgeSource for FlakySource {
    async fn is_available(&self) -> knowflow_search::Result<bool> {
        Err(SearchError::unavailable("flaky", "credentials missing"))
    }

    async fn search(
        &self,
        _query: &str,
        _limit: usize,
    ) -> knowflow_search::Result<Vec<ResultSnippet>> {
        Err(SearchError::search_failed("flaky", "should never be called"))
    }
}

fn tool() -> SearchKnowledgeTool {
    let mut registry = SourceRegistry::new();
    registry
        .register(TestDocsSource::descriptor(), Arc::new(TestDocsSource))
        .unwrap();
    registry
        .register(
            SourceDescriptor::new("notes", "Meeting Notes", "For team meeting notes and decisions"),
            Arc::new(NotesSource),
        )
        .unwrap();
    registry
        .register(
            SourceDescriptor::new("flaky", "Flaky", "Sometimes works"),
            Arc::new(FlakySource),
        )
        .unwrap();
    SearchKnowledgeTool::new(KnowledgeService::with_defaults(Arc::new(registry)))
}

fn parse(content: &str) -> Value {
    serde_json::from_str(content).expect("tool output is JSON")
}

#[tokio::test]
async fn preferred_notes_outrank_docs() {
    let output = tool()
        .execute(&json!({"query": "monorepo", "preferredSource": "notes", "limit": 2}))
        .await;

    assert!(!output.is_error);
    let envelope = parse(&output.content);
    let results = envelope["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["metadata"]["source"], "notes");
    assert_eq!(results[0]["metadata"]["score"], 1.0);
    assert_eq!(results[1]["metadata"]["source"], "docs");
    assert_eq!(results[1]["metadata"]["reference"], "architecture-notes.md");
    assert_eq!(envelope["instructions"], knowflow_search::INSTRUCTIONS);
}

#[tokio::test]
async fn default_limit_is_three() {
    let output = tool().execute(&json!({"query": "monorepo"})).await;
    let envelope = parse(&output.content);
    let results = envelope["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    let sources: Vec<&str> = results
        .iter()
        .map(|r| r["metadata"]["source"].as_str().unwrap())
        .collect();
    assert_eq!(sources, vec!["docs", "notes", "docs"]);
}

#[tokio::test]
async fn zero_limit_returns_error_payload() {
    let output = tool().execute(&json!({"query": "q", "limit": 0})).await;
    assert!(output.is_error);
    let payload = parse(&output.content);
    assert_eq!(payload["error"], "INVALID_REQUEST");
    assert!(payload["message"].as_str().unwrap().contains("limit"));
}

#[tokio::test]
async fn negative_limit_returns_error_payload() {
    let output = tool().execute(&json!({"query": "q", "limit": -4})).await;
    assert!(output.is_error);
    assert_eq!(parse(&output.content)["error"], "INVALID_REQUEST");
}

#[tokio::test]
async fn missing_query_returns_error_payload() {
    let output = tool().execute(&json!({"limit": 2})).await;
    assert!(output.is_error);
    assert!(parse(&output.content)["message"].as_str().unwrap().contains("query"));
}

#[tokio::test]
async fn description_lists_only_available_sources() {
    let description = tool().description().await;
    assert!(description.contains("- docs:"));
    assert!(description.contains("- notes:"));
    assert!(!description.contains("- flaky:"));
}

#[tokio::test]
async fn list_sources_excludes_unavailable() {
    let output = tool().list_sources().await;
    let sources = parse(&output.content);
    let ids: Vec<&str> = sources
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["docs", "notes"]);
}

#[test]
fn schema_requires_query() {
    let schema = tool().schema();
    let required = schema["required"].as_array().unwrap();
    assert!(required.iter().any(|v| v.as_str() == Some("query")));
    assert_eq!(schema["properties"]["limit"]["minimum"], 1);
}
