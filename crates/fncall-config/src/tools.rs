use serde::{Deserialize, Serialize};

use crate::{llm::LlmConfig, query_db::QueryDbConfig, rag::RagConfig, translate::TranslateConfig};

/// Tool registry: configuration blocks keyed by tool name
///
/// Tools that need no settings (`get_time`, `calculator`, `python_repl`)
/// have no block here and always run with the top-level LLM.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Natural-language queries over a relational database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_db: Option<QueryDbConfig>,
    /// Translation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate: Option<TranslateConfig>,
    /// Retrieval-augmented answering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rag: Option<RagConfig>,
}

impl ToolsConfig {
    /// Configured tool blocks with their optional LLM override
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&LlmConfig>)> {
        [
            ("query_db", self.query_db.as_ref().map(|t| t.llm.as_ref())),
            ("translate", self.translate.as_ref().map(|t| t.llm.as_ref())),
            ("rag", self.rag.as_ref().map(|t| t.llm.as_ref())),
        ]
        .into_iter()
        .filter_map(|(name, block)| block.map(|llm| (name, llm)))
    }

    /// LLM override declared by a tool, if any
    pub fn llm_override(&self, tool: &str) -> Option<&LlmConfig> {
        self.iter().find(|(name, _)| *name == tool).and_then(|(_, llm)| llm)
    }

    /// Whether a tool has a configuration block
    pub fn contains(&self, tool: &str) -> bool {
        self.iter().any(|(name, _)| name == tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_skips_missing_blocks() {
        let yaml = "translate:\n  llm: null\n";
        let tools: ToolsConfig = serde_yaml::from_str(yaml).unwrap();

        let names: Vec<_> = tools.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["translate"]);
        assert!(tools.contains("translate"));
        assert!(!tools.contains("rag"));
        assert!(tools.llm_override("translate").is_none());
    }

    #[test]
    fn rejects_unknown_tool_block() {
        let err = serde_yaml::from_str::<ToolsConfig>("web_search: {}\n").unwrap_err();
        assert!(err.to_string().contains("web_search"));
    }
}
