//! Core types: source descriptors, result snippets and the response envelope.

use serde::{Deserialize, Serialize};

/// Fixed guidance returned to the caller with every response.
pub const INSTRUCTIONS: &str = "IMPORTANT: The snippets below contain ALL necessary information to answer the query. DO NOT attempt to access or load the source files mentioned in metadata. Use ONLY the content field from each result. ALWAYS cite the EXACT source filenames WITH EXTENSION (e.g., 'According to architecture-notes.md...'). DO NOT paraphrase source names like 'architecture notes' - use the exact filename 'architecture-notes.md'. The lastModified date shows when information was updated (newer may be more relevant). The score (0-1) indicates how relevant each result is to your query.";

/// Static identity of a knowledge source.
///
/// The `description` is shown to the calling model so it can pick a
/// preferred source, so it should say what domain the source covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Unique short identifier, e.g. `"docs"` or `"jira"`.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// What this source knows about.
    pub description: String,
}

impl SourceDescriptor {
    /// Build a descriptor from its three parts.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Metadata attached to every snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetMetadata {
    /// Pointer to the snippet's origin inside its source (a file name, ticket key...).
    pub reference: String,
    /// Identifier of the source that produced this snippet.
    ///
    /// Sources leave this unset; the aggregator fills it in and overwrites
    /// whatever a source may have put here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// ISO-8601 timestamp of the last modification.
    pub last_modified: String,
    /// Relevance in `[0, 1]`, higher is better.
    pub score: f64,
}

/// One unit of retrieved content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSnippet {
    /// The retrievable text itself.
    pub content: String,
    /// Attribution and relevance.
    pub metadata: SnippetMetadata,
}

impl ResultSnippet {
    /// Create an untagged snippet, as a source would.
    pub fn new(
        content: impl Into<String>,
        reference: impl Into<String>,
        last_modified: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            content: content.into(),
            metadata: SnippetMetadata {
                reference: reference.into(),
                source: None,
                last_modified: last_modified.into(),
                score,
            },
        }
    }

    /// Relevance score.
    pub fn score(&self) -> f64 {
        self.metadata.score
    }

    /// Owning source identifier, if tagged.
    pub fn source(&self) -> Option<&str> {
        self.metadata.source.as_deref()
    }
}

/// The wrapped response handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Usage guidance for the calling model.
    pub instructions: String,
    /// Merged results, relevance-descending.
    pub results: Vec<ResultSnippet>,
}

impl SearchResponse {
    /// Wrap results with the fixed [`INSTRUCTIONS`].
    pub fn new(results: Vec<ResultSnippet>) -> Self {
        Self {
            instructions: INSTRUCTIONS.to_string(),
            results,
        }
    }
}
