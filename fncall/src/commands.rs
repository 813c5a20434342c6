use std::{fmt::Write as _, path::Path};

use fncall_config::{Config, KNOWN_TOOLS, Severity, StTools, ValidationIssue};
use serde_json::json;

/// One line per finding, or a confirmation when there are none
pub fn render_issues(issues: &[ValidationIssue]) -> String {
    if issues.is_empty() {
        return "configuration is valid".to_owned();
    }

    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

/// Outcome of `check`: success unless some finding is an error
///
/// # Errors
///
/// Returns an error naming the file and the number of errors
pub fn check_verdict(config_path: &Path, issues: &[ValidationIssue]) -> anyhow::Result<()> {
    match issues.iter().filter(|issue| issue.severity == Severity::Error).count() {
        0 => Ok(()),
        1 => anyhow::bail!("{} has 1 error", config_path.display()),
        count => anyhow::bail!("{} has {count} errors", config_path.display()),
    }
}

/// Effective LLM settings of a tool and the kwargs it sends
///
/// # Errors
///
/// Returns an error if the tool is not one the agent knows
pub fn render_tool(config: &Config, tool: &str) -> anyhow::Result<String> {
    if !KNOWN_TOOLS.contains(&tool) {
        anyhow::bail!("unknown tool `{tool}`, expected one of: {}", KNOWN_TOOLS.join(", "));
    }

    let source = if config.tools.llm_override(tool).is_some() {
        "tool"
    } else {
        "default"
    };
    let llm = config.effective_llm(tool);

    let mut rendered = json!({
        "tool": tool,
        "configured": config.tools.contains(tool),
        "llm_source": source,
        "llm": llm,
        "model_kwargs": llm.model_kwargs(),
    });

    if tool == "rag"
        && let Some(ref rag) = config.tools.rag
    {
        rendered["documents_kept"] = json!(rag.retrieval.documents_kept());
    }

    Ok(serde_json::to_string_pretty(&rendered)?)
}

/// Tool selector table, one row per tool in declaration order
pub fn render_tools(st_tools: &StTools) -> String {
    let flag = |value: bool| if value { "yes" } else { "no" };

    let mut out = format!("{:<14}{:<9}{}", "TOOL", "ENABLED", "DEFAULT");
    for (name, visibility) in st_tools.iter() {
        let _ = write!(
            out,
            "\n{name:<14}{:<9}{}",
            flag(visibility.enabled),
            flag(visibility.default)
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use fncall_config::{ConfigFormat, ToolVisibility};

    use super::*;

    const CONFIG: &str = "
llm:
  api: sncloud
  do_sample: false
  temperature: 0.0
  max_tokens_to_generate: 1024
  coe: false
tools:
  translate:
    llm:
      api: sncloud
      do_sample: false
      temperature: 0.0
      max_tokens_to_generate: 256
      coe: true
      select_expert: Meta-Llama-3.1-8B-Instruct
  rag:
    embedding_model:
      type: cpu
      batch_size: 1
    vector_db:
      path: data/my-vector-db
    retrieval:
      k_retrieved_documents: 5
      score_treshold: 0.3
      reranker: BAAI/bge-reranker-large
      final_k_retrieved_documents: 2
";

    fn issue(severity: Severity, path: &str, message: &str) -> ValidationIssue {
        ValidationIssue {
            severity,
            path: path.to_owned(),
            message: message.to_owned(),
        }
    }

    fn mixed_issues() -> Vec<ValidationIssue> {
        vec![
            issue(Severity::Error, "llm.select_expert", "required when coe is true"),
            issue(Severity::Warning, "st_tools.web_search", "not a tool the agent recognizes"),
            issue(Severity::Error, "tools.rag.retrieval.score_treshold", "must be between 0.0 and 1.0"),
        ]
    }

    #[test]
    fn tools_table() {
        let st_tools: StTools = [
            (
                "get_time".to_owned(),
                ToolVisibility {
                    enabled: true,
                    default: true,
                },
            ),
            (
                "python_repl".to_owned(),
                ToolVisibility {
                    enabled: false,
                    default: false,
                },
            ),
        ]
        .into_iter()
        .collect();

        insta::assert_snapshot!(render_tools(&st_tools), @r"
        TOOL          ENABLED  DEFAULT
        get_time      yes      yes
        python_repl   no       no
        ");
    }

    #[test]
    fn tool_with_override() {
        let config = Config::parse(CONFIG, ConfigFormat::Yaml).unwrap();
        let rendered: serde_json::Value = serde_json::from_str(&render_tool(&config, "translate").unwrap()).unwrap();

        assert_eq!(rendered["llm_source"], "tool");
        assert_eq!(rendered["model_kwargs"]["max_tokens_to_generate"], 256);
        assert_eq!(rendered["model_kwargs"]["select_expert"], "Meta-Llama-3.1-8B-Instruct");
    }

    #[test]
    fn tool_without_override_uses_default() {
        let config = Config::parse(CONFIG, ConfigFormat::Yaml).unwrap();
        let rendered: serde_json::Value = serde_json::from_str(&render_tool(&config, "calculator").unwrap()).unwrap();

        assert_eq!(rendered["llm_source"], "default");
        assert_eq!(rendered["llm"]["max_tokens_to_generate"], 1024);
    }

    #[test]
    fn unknown_tool() {
        let config = Config::parse(CONFIG, ConfigFormat::Yaml).unwrap();
        assert!(render_tool(&config, "web_search").is_err());
    }

    #[test]
    fn rag_shows_documents_kept() {
        let config = Config::parse(CONFIG, ConfigFormat::Yaml).unwrap();
        let rendered: serde_json::Value = serde_json::from_str(&render_tool(&config, "rag").unwrap()).unwrap();

        assert_eq!(rendered["configured"], true);
        assert_eq!(rendered["llm_source"], "default");
        assert_eq!(rendered["documents_kept"], 2);
    }

    #[test]
    fn clean_config_report() {
        assert_eq!(render_issues(&[]), "configuration is valid");
        assert!(check_verdict(&PathBuf::from("config.yaml"), &[]).is_ok());
    }

    #[test]
    fn issue_report_lists_every_finding() {
        insta::assert_snapshot!(render_issues(&mixed_issues()), @r"
        error llm.select_expert: required when coe is true
        warning st_tools.web_search: not a tool the agent recognizes
        error tools.rag.retrieval.score_treshold: must be between 0.0 and 1.0
        ");
    }

    #[test]
    fn warnings_alone_pass_the_check() {
        let warnings: Vec<_> = mixed_issues()
            .into_iter()
            .filter(|issue| issue.severity == Severity::Warning)
            .collect();

        assert!(check_verdict(&PathBuf::from("config.yaml"), &warnings).is_ok());
    }

    #[test]
    fn errors_fail_the_check() {
        let err = check_verdict(&PathBuf::from("config.yaml"), &mixed_issues()).unwrap_err();
        assert_eq!(err.to_string(), "config.yaml has 2 errors");

        let issues = mixed_issues();
        let err = check_verdict(&PathBuf::from("config.yaml"), &issues[..1]).unwrap_err();
        assert_eq!(err.to_string(), "config.yaml has 1 error");
    }
}
