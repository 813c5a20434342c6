use std::{fmt, path::Path};

use crate::{Config, EmbeddingModelConfig, KNOWN_TOOLS, LlmConfig, RetrievalConfig};

/// How serious a validation finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// The configuration cannot be used
    Error,
    /// Suspicious but usable
    Warning,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Dotted key path the finding refers to
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity, self.path, self.message)
    }
}

#[derive(Default)]
struct Issues(Vec<ValidationIssue>);

impl Issues {
    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, path.into(), message.into());
    }

    fn warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warning, path.into(), message.into());
    }

    fn push(&mut self, severity: Severity, path: String, message: String) {
        self.0.push(ValidationIssue {
            severity,
            path,
            message,
        });
    }
}

impl Config {
    /// Every schema-level finding, errors and warnings alike
    pub fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Issues::default();

        check_llm(&mut issues, "llm", &self.llm);

        for (name, llm) in self.tools.iter() {
            if let Some(llm) = llm {
                check_llm(&mut issues, &format!("tools.{name}.llm"), llm);
            }
        }

        if let Some(ref query_db) = self.tools.query_db {
            check_path(&mut issues, "tools.query_db.db.path", &query_db.db.path);
        }

        if let Some(ref rag) = self.tools.rag {
            check_embedding_model(&mut issues, &rag.embedding_model);
            check_path(&mut issues, "tools.rag.vector_db.path", &rag.vector_db.path);
            check_retrieval(&mut issues, &rag.retrieval);
        }

        self.check_st_tools(&mut issues);

        issues.0
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Warnings are logged and do not fail validation.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first error-severity finding
    pub fn validate(&self) -> anyhow::Result<()> {
        let issues = self.issues();

        for issue in issues.iter().filter(|i| i.severity == Severity::Warning) {
            tracing::warn!(path = %issue.path, "{}", issue.message);
        }

        if let Some(error) = issues.into_iter().find(|i| i.severity == Severity::Error) {
            anyhow::bail!("invalid configuration at {}: {}", error.path, error.message);
        }

        Ok(())
    }

    fn check_st_tools(&self, issues: &mut Issues) {
        for (name, visibility) in self.st_tools.iter() {
            if visibility.default && !visibility.enabled {
                issues.error(
                    format!("st_tools.{name}.default"),
                    "a tool selected by default must also be enabled",
                );
            }

            if !KNOWN_TOOLS.contains(&name) {
                issues.warning(format!("st_tools.{name}"), "not a tool the agent recognizes");
            }
        }
    }
}

fn check_llm(issues: &mut Issues, path: &str, llm: &LlmConfig) {
    if llm.coe && llm.select_expert.as_deref().is_none_or(|e| e.trim().is_empty()) {
        issues.error(format!("{path}.select_expert"), "required when coe is true");
    }

    if llm.max_tokens_to_generate == 0 {
        issues.error(format!("{path}.max_tokens_to_generate"), "must be greater than 0");
    }

    if !llm.temperature.is_finite() || llm.temperature < 0.0 {
        issues.error(format!("{path}.temperature"), "must be a non-negative number");
    }
}

fn check_embedding_model(issues: &mut Issues, model: &EmbeddingModelConfig) {
    const PATH: &str = "tools.rag.embedding_model";

    if model.batch_size == 0 {
        issues.error(format!("{PATH}.batch_size"), "must be greater than 0");
    }

    if model.coe && model.select_expert.as_deref().is_none_or(|e| e.trim().is_empty()) {
        issues.error(format!("{PATH}.select_expert"), "required when coe is true");
    }
}

fn check_retrieval(issues: &mut Issues, retrieval: &RetrievalConfig) {
    const PATH: &str = "tools.rag.retrieval";

    if retrieval.k_retrieved_documents == 0 {
        issues.error(format!("{PATH}.k_retrieved_documents"), "must be greater than 0");
    }

    if !(0.0..=1.0).contains(&retrieval.score_treshold) {
        issues.error(format!("{PATH}.score_treshold"), "must be between 0.0 and 1.0");
    }

    match retrieval.final_k_retrieved_documents {
        Some(0) => issues.error(format!("{PATH}.final_k_retrieved_documents"), "must be greater than 0"),
        Some(final_k) if final_k > retrieval.k_retrieved_documents => issues.error(
            format!("{PATH}.final_k_retrieved_documents"),
            format!(
                "cannot keep {final_k} documents when only {} are retrieved",
                retrieval.k_retrieved_documents
            ),
        ),
        _ => {}
    }
}

fn check_path(issues: &mut Issues, path: &str, value: &Path) {
    if value.as_os_str().to_string_lossy().trim().is_empty() {
        issues.error(path, "must not be empty or blank");
    }
}
