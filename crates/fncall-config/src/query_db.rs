use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::llm::LlmConfig;

/// `tools.query_db` configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueryDbConfig {
    /// LLM override used to write SQL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmConfig>,
    /// Relational database to query
    pub db: DbConfig,
}

/// Relational database location
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DbConfig {
    /// Path to the database file
    pub path: PathBuf,
}
