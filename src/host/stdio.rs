//! Stdin/stdout JSON bridge for the knowledge tools.
//!
//! Reads newline-delimited JSON [`ToolCall`] messages, dispatches each to
//! the [`SearchKnowledgeTool`], and writes one [`ToolResponse`] line per
//! call.
//!
//! Stdout is exclusively reserved for the JSON protocol; all diagnostic
//! output (tracing, logs) must be routed to stderr.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::{KnowflowError, Result};
use crate::host::contract::{ToolCall, ToolName, ToolResponse};
use crate::tool::SearchKnowledgeTool;

/// Run the bridge over the process's stdin and stdout until stdin closes.
pub async fn run_stdio_bridge(tool: &SearchKnowledgeTool) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let mut writer = tokio::io::stdout();
    run_bridge(tool, reader, &mut writer).await
}

/// Run the bridge over arbitrary line-oriented input and output.
///
/// Calls are handled one at a time, in arrival order. Unparsable lines and
/// unknown tool names produce error responses; blank lines are ignored.
pub async fn run_bridge<R, W>(
    tool: &SearchKnowledgeTool,
    mut reader: R,
    writer: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| KnowflowError::Channel(format!("failed to read from stdin: {e}")))?;

        // EOF
        if bytes_read == 0 {
            tracing::info!("stdin closed (EOF); shutting down stdio bridge");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<ToolCall>(trimmed) {
            Ok(call) => dispatch(tool, call).await,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse tool call from stdin");
                ToolResponse::error(
                    None,
                    "PARSE_ERROR",
                    format!("failed to parse tool call: {e}"),
                )
            }
        };

        let json = serde_json::to_string(&response).map_err(|e| {
            KnowflowError::Channel(format!("failed to serialize tool response: {e}"))
        })?;
        write_line(writer, &json).await?;
    }

    Ok(())
}

async fn dispatch(tool: &SearchKnowledgeTool, call: ToolCall) -> ToolResponse {
    let Some(name) = ToolName::parse(&call.name) else {
        tracing::warn!(tool = %call.name, "unknown tool requested");
        return ToolResponse::error(
            call.id,
            "UNKNOWN_TOOL",
            format!("unknown tool: {}", call.name),
        );
    };

    tracing::debug!(tool = name.as_str(), id = ?call.id, "dispatching tool call");
    let output = match name {
        ToolName::SearchKnowledge => tool.execute(&call.arguments).await,
        ToolName::ListSources => tool.list_sources().await,
        ToolName::ListTools => tool.definition().await,
    };
    ToolResponse::from_output(call.id, output)
}

/// Write a single JSON line and flush.
async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, json: &str) -> Result<()> {
    writer
        .write_all(json.as_bytes())
        .await
        .map_err(|e| KnowflowError::Channel(format!("failed to write to stdout: {e}")))?;
    writer
        .write_all(b"\n")
        .await
        .map_err(|e| KnowflowError::Channel(format!("failed to write newline to stdout: {e}")))?;
    writer
        .flush()
        .await
        .map_err(|e| KnowflowError::Channel(format!("failed to flush stdout: {e}")))?;
    Ok(())
}
