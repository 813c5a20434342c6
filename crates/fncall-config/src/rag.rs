use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::llm::LlmConfig;

/// `tools.rag` configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RagConfig {
    /// LLM override used to answer from retrieved context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmConfig>,
    /// Embedding backend used to index and query documents
    pub embedding_model: EmbeddingModelConfig,
    /// Vector store location
    pub vector_db: VectorDbConfig,
    /// Retrieval parameters
    pub retrieval: RetrievalConfig,
}

/// Where embeddings are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EmbeddingBackend {
    /// Local model on the CPU
    Cpu,
    /// SambaStudio embeddings endpoint
    Sambastudio,
}

/// Embedding model configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddingModelConfig {
    /// Embedding backend
    #[serde(rename = "type")]
    pub backend: EmbeddingBackend,
    /// Documents sent per embedding request
    pub batch_size: u32,
    /// Embeddings are served by a CoE endpoint
    #[serde(default)]
    pub coe: bool,
    /// Embedding expert, required when `coe` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_expert: Option<String>,
}

/// Vector store location
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VectorDbConfig {
    /// Directory holding the persisted vector store
    pub path: PathBuf,
}

/// Retrieval parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetrievalConfig {
    /// Number of documents fetched from the vector store
    pub k_retrieved_documents: u32,
    /// Minimum similarity score, in `[0.0, 1.0]`
    pub score_treshold: f64,
    /// Reranker model id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reranker: Option<String>,
    /// Documents kept after reranking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_k_retrieved_documents: Option<u32>,
}

impl RetrievalConfig {
    /// Number of documents that reach the prompt
    pub fn documents_kept(&self) -> u32 {
        self.final_k_retrieved_documents
            .unwrap_or(self.k_retrieved_documents)
            .min(self.k_retrieved_documents)
    }
}
