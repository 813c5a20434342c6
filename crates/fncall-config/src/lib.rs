#![allow(clippy::must_use_candidate)]

mod env;
pub mod llm;
mod loader;
pub mod query_db;
pub mod rag;
pub mod st_tools;
pub mod tools;
pub mod translate;
mod validate;

use serde::{Deserialize, Serialize};

pub use llm::*;
pub use loader::ConfigFormat;
pub use query_db::*;
pub use rag::*;
pub use st_tools::*;
pub use tools::*;
pub use translate::*;
pub use validate::{Severity, ValidationIssue};

/// Tool names the agent application knows how to dispatch
pub const KNOWN_TOOLS: &[&str] = &["get_time", "calculator", "python_repl", "query_db", "translate", "rag"];

/// Top-level agent configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default LLM used by the agent and by tools without an override
    pub llm: LlmConfig,
    /// Per-tool configuration blocks
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Production vs. development behavior toggle
    #[serde(default)]
    pub prod_mode: bool,
    /// Tool selector visibility table
    #[serde(default)]
    pub st_tools: StTools,
}

impl Config {
    /// LLM settings a tool runs with: its own `llm` block when present,
    /// the top-level one otherwise
    pub fn effective_llm(&self, tool: &str) -> &LlmConfig {
        self.tools.llm_override(tool).unwrap_or(&self.llm)
    }
}
