//! KnowFlow: federated knowledge search for language-model tool callers.
//!
//! This crate embeds the [`knowflow_search`] core in a host process:
//! - **Config**: TOML settings for limits, timeouts, and enabled plugins
//! - **Plugins**: built-in knowledge sources and startup discovery
//! - **Tool**: the `search_knowledge` adapter (argument parsing, envelope
//!   serialization, `{error, message}` payloads)
//! - **Host**: a newline-delimited JSON bridge over stdin/stdout

pub mod config;
pub mod error;
pub mod host;
pub mod plugins;
pub mod startup;
pub mod tool;

pub use config::KnowflowConfig;
pub use error::{KnowflowError, Result};
pub use tool::{SearchKnowledgeTool, ToolOutput};
