use serde::{Deserialize, Serialize};

use crate::llm::LlmConfig;

/// `tools.translate` configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TranslateConfig {
    /// LLM override used for translation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmConfig>,
}
