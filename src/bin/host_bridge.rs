//! Headless host binary serving the knowledge tools over stdin/stdout.
//!
//! Reads `ToolCall` messages as newline-delimited JSON from stdin and
//! writes one `ToolResponse` line per call to stdout.
//!
//! All tracing/diagnostic output goes to stderr so that stdout remains a
//! clean JSON protocol channel.

use knowflow::KnowflowConfig;
use knowflow::host::stdio::run_stdio_bridge;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing to stderr only (stdout is reserved for the JSON
    // protocol).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("knowflow-host starting");

    let path = KnowflowConfig::default_config_path();
    let config = KnowflowConfig::load_or_default(&path)
        .map_err(|e| anyhow::anyhow!("failed to load config from {}: {e}", path.display()))?;

    let tool = knowflow::startup::initialize(&config)
        .map_err(|e| anyhow::anyhow!("startup failed: {e}"))?;

    run_stdio_bridge(&tool).await.map_err(|e| {
        tracing::error!(error = %e, "knowflow-host exited with error");
        anyhow::anyhow!("knowflow-host failed: {e}")
    })?;

    tracing::info!("knowflow-host shut down cleanly");
    Ok(())
}
