//! Request/response lines exchanged over the stdio bridge.

use serde::{Deserialize, Serialize};

use crate::tool::ToolOutput;

/// Tools the host answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    SearchKnowledge,
    ListSources,
    ListTools,
}

impl ToolName {
    /// Render tool name to wire format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SearchKnowledge => crate::tool::SEARCH_TOOL_NAME,
            Self::ListSources => crate::tool::LIST_SOURCES_TOOL_NAME,
            Self::ListTools => crate::tool::LIST_TOOLS_NAME,
        }
    }

    /// Parse a tool name from wire format.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            crate::tool::SEARCH_TOOL_NAME => Some(Self::SearchKnowledge),
            crate::tool::LIST_SOURCES_TOOL_NAME => Some(Self::ListSources),
            crate::tool::LIST_TOOLS_NAME => Some(Self::ListTools),
            _ => None,
        }
    }
}

/// One tool invocation read from stdin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Caller-chosen correlation id, echoed back in the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tool name, e.g. `search_knowledge`.
    pub name: String,
    /// Tool arguments.
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// One response line written to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    /// Correlation id copied from the call, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Serialized result text.
    pub content: String,
    /// Whether `content` is an `{error, message}` payload.
    pub is_error: bool,
}

impl ToolResponse {
    /// Build a response from a tool's output.
    #[must_use]
    pub fn from_output(id: Option<String>, output: ToolOutput) -> Self {
        Self {
            id,
            content: output.content,
            is_error: output.is_error,
        }
    }

    /// Build an error response with the standard error payload.
    #[must_use]
    pub fn error(id: Option<String>, code: &str, message: impl Into<String>) -> Self {
        Self::from_output(id, ToolOutput::error(code, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_names_round_trip() {
        for name in [
            ToolName::SearchKnowledge,
            ToolName::ListSources,
            ToolName::ListTools,
        ] {
            assert_eq!(ToolName::parse(name.as_str()), Some(name));
        }
        assert_eq!(ToolName::parse("web_search"), None);
    }

    #[test]
    fn call_without_arguments_or_id_parses() {
        let call: ToolCall = serde_json::from_str(r#"{"name":"list_sources"}"#).expect("parse");
        assert_eq!(call.name, "list_sources");
        assert!(call.id.is_none());
        assert!(call.arguments.is_null());
    }

    #[test]
    fn response_uses_camel_case() {
        let resp = ToolResponse::error(Some("7".into()), "INVALID_REQUEST", "bad");
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["id"], "7");
        assert_eq!(json["isError"], true);
        assert!(json["content"].as_str().unwrap_or_default().contains("INVALID_REQUEST"));
    }
}
