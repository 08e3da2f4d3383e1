//! The `search_knowledge` tool: argument parsing, dispatch, and serialization.
//!
//! Tool-calling layers hand over a JSON argument object and expect text
//! back. On success the text is the pretty-printed response envelope; on a
//! malformed request it is an `{"error", "message"}` payload.

use std::fmt::Write as _;

use knowflow_search::{KnowledgeService, SearchError, SourceDescriptor};
use serde::Serialize;
use serde_json::Value;

/// Wire name of the search tool.
pub const SEARCH_TOOL_NAME: &str = "search_knowledge";

/// Wire name of the source-listing companion call.
pub const LIST_SOURCES_TOOL_NAME: &str = "list_sources";

/// Wire name of the call that returns the tool definition.
pub const LIST_TOOLS_NAME: &str = "tools/list";

const USAGE_INSTRUCTIONS: &str = "IMPORTANT USAGE INSTRUCTIONS:
  1. This tool returns content snippets directly from the knowledge base
  2. DO NOT attempt to access or load the files named in metadata.reference
  3. Use ONLY the content field from each result to answer queries
  4. ALWAYS cite the EXACT reference (including file extension) when presenting information
  5. The lastModified field indicates when the information was updated - newer information may be more relevant
  6. The score field (0-1) indicates how relevant the result is to the query
  7. Naming a preferredSource raises its results by a fixed 0.2 (capped at 1.0); it does not exclude other sources";

/// Text returned to the tool-calling layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Serialized JSON payload.
    pub content: String,
    /// Whether `content` is an error payload.
    pub is_error: bool,
}

impl ToolOutput {
    fn success(content: String) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Build an `{"error", "message"}` payload.
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        let payload = ErrorPayload {
            error: code,
            message: message.into(),
        };
        let content = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| {
            format!("{{\"error\":\"{code}\",\"message\":\"unserializable error\"}}")
        });
        Self {
            content,
            is_error: true,
        }
    }

    fn from_search_error(err: &SearchError) -> Self {
        Self::error(err.code(), err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorPayload<'a> {
    error: &'a str,
    message: String,
}

/// Parsed, validated `search_knowledge` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// The search query.
    pub query: String,
    /// Source whose results should be boosted.
    pub preferred_source: Option<String>,
    /// Maximum number of results.
    pub limit: usize,
}

impl SearchRequest {
    /// Parse tool arguments, applying `default_limit` when `limit` is absent.
    ///
    /// `system` is accepted as an alias for `preferredSource`. The preferred
    /// source is matched exactly against source ids; an empty string means
    /// no preference.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] for a missing or empty query,
    /// a non-string preferred source, or a limit that is not a positive integer.
    pub fn from_args(args: &Value, default_limit: usize) -> Result<Self, SearchError> {
        let query = args
            .get("query")
            .and_then(Value::as_str)
            .ok_or_else(|| SearchError::InvalidRequest("missing required argument: query".into()))?;
        if query.trim().is_empty() {
            return Err(SearchError::InvalidRequest(
                "query must not be empty".into(),
            ));
        }

        let preferred_source = match args.get("preferredSource").or_else(|| args.get("system")) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                return Err(SearchError::InvalidRequest(
                    "preferredSource must be a string".into(),
                ));
            }
        };

        let limit = match args.get("limit") {
            None | Some(Value::Null) => default_limit,
            Some(value) => value
                .as_i64()
                .filter(|n| *n > 0)
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| {
                    SearchError::InvalidRequest(format!(
                        "limit must be a positive integer, got {value}"
                    ))
                })?,
        };

        Ok(Self {
            query: query.to_string(),
            preferred_source,
            limit,
        })
    }
}

/// Adapter exposing a [`KnowledgeService`] as a callable tool.
#[derive(Debug, Clone)]
pub struct SearchKnowledgeTool {
    service: KnowledgeService,
}

impl SearchKnowledgeTool {
    /// Wrap a service.
    pub fn new(service: KnowledgeService) -> Self {
        Self { service }
    }

    /// The wrapped service.
    pub fn service(&self) -> &KnowledgeService {
        &self.service
    }

    /// Tool name.
    pub fn name(&self) -> &str {
        SEARCH_TOOL_NAME
    }

    /// Caller-facing description listing the currently available sources.
    pub async fn description(&self) -> String {
        describe(&self.service.available_sources().await)
    }

    /// JSON schema of the tool arguments.
    pub fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to find relevant information"
                },
                "preferredSource": {
                    "type": "string",
                    "description": "The exact id of the preferred knowledge source (e.g. docs, jira). Results from it are prioritized."
                },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "description": format!(
                        "Maximum number of results to return (default {}, at most {} are returned)",
                        self.service.config().default_limit,
                        self.service.config().max_limit
                    )
                }
            },
            "required": ["query"]
        })
    }

    /// Run a search from raw tool arguments.
    pub async fn execute(&self, args: &Value) -> ToolOutput {
        let request = match SearchRequest::from_args(args, self.service.config().default_limit) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(error = %err, "rejected tool arguments");
                return ToolOutput::from_search_error(&err);
            }
        };

        let response = match self
            .service
            .search(
                &request.query,
                request.preferred_source.as_deref(),
                request.limit,
            )
            .await
        {
            Ok(response) => response,
            Err(err) => return ToolOutput::from_search_error(&err),
        };

        match serde_json::to_string_pretty(&response) {
            Ok(json) => ToolOutput::success(json),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize response envelope");
                ToolOutput::error("SERIALIZATION_FAILED", err.to_string())
            }
        }
    }

    /// Tool definition: name, current description, and argument schema.
    pub async fn definition(&self) -> ToolOutput {
        let description = self.description().await;
        let definition = serde_json::json!([{
            "name": self.name(),
            "description": description,
            "inputSchema": self.schema(),
        }]);
        match serde_json::to_string_pretty(&definition) {
            Ok(json) => ToolOutput::success(json),
            Err(err) => ToolOutput::error("SERIALIZATION_FAILED", err.to_string()),
        }
    }

    /// List currently available sources as JSON.
    pub async fn list_sources(&self) -> ToolOutput {
        let sources = self.service.available_sources().await;
        match serde_json::to_string_pretty(&sources) {
            Ok(json) => ToolOutput::success(json),
            Err(err) => ToolOutput::error("SERIALIZATION_FAILED", err.to_string()),
        }
    }
}

/// Render the tool description for a set of sources.
pub fn describe(sources: &[SourceDescriptor]) -> String {
    let mut text = String::from(
        "Searches for information in the knowledge base. Use this tool when you need to retrieve specific information or context.\n\nAvailable knowledge sources:\n",
    );
    if sources.is_empty() {
        text.push_str("  (none currently available)\n");
    }
    for source in sources {
        let _ = writeln!(
            text,
            "  - {}: {} ({})",
            source.id, source.description, source.name
        );
    }
    text.push('\n');
    text.push_str(USAGE_INSTRUCTIONS);
    text
}
