use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Matches `{{ env.VAR }}` and `{{ env.VAR | default("fallback") }}`
fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

/// Substitute environment placeholders in raw configuration text
///
/// Works on the text before it is parsed, so YAML and TOML files share
/// the same syntax. Whole-line `#` comments are copied verbatim; a
/// placeholder inside one is never resolved.
pub fn expand_env(input: &str) -> anyhow::Result<String> {
    let mut lines = Vec::new();

    for (index, line) in input.lines().enumerate() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_owned());
            continue;
        }

        lines.push(expand_line(line).map_err(|e| anyhow::anyhow!("line {}: {e}", index + 1))?);
    }

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn expand_line(line: &str) -> anyhow::Result<String> {
    let mut output = String::with_capacity(line.len());
    let mut cursor = 0;

    for captures in placeholder().captures_iter(line) {
        let Some(whole) = captures.get(0) else {
            continue;
        };

        output.push_str(&line[cursor..whole.start()]);
        output.push_str(&resolve(&captures)?);
        cursor = whole.end();
    }

    output.push_str(&line[cursor..]);
    Ok(output)
}

fn resolve(captures: &Captures<'_>) -> anyhow::Result<String> {
    let key = captures.get(1).map_or("", |m| m.as_str());
    let fallback = captures.get(2).map(|m| m.as_str());

    let Some(name) = key.strip_prefix("env.").filter(|name| !name.is_empty() && !name.contains('.')) else {
        anyhow::bail!("only variables scoped with 'env.' are supported: `{key}`");
    };

    match (std::env::var(name), fallback) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => anyhow::bail!("environment variable not found: `{name}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "llm:\n  api: sncloud\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn substitutes_variable() {
        temp_env::with_var("FNCALL_DB_PATH", Some("data/chinook.db"), || {
            let result = expand_env("path: \"{{ env.FNCALL_DB_PATH }}\"").unwrap();
            assert_eq!(result, "path: \"data/chinook.db\"");
        });
    }

    #[test]
    fn substitutes_several_variables_on_one_line() {
        let vars = [("FNCALL_A", Some("a")), ("FNCALL_B", Some("b"))];
        temp_env::with_vars(vars, || {
            let result = expand_env("key: {{ env.FNCALL_A }}-{{env.FNCALL_B}}").unwrap();
            assert_eq!(result, "key: a-b");
        });
    }

    #[test]
    fn missing_variable_reports_line() {
        temp_env::with_var_unset("FNCALL_MISSING", || {
            let err = expand_env("llm:\n  select_expert: {{ env.FNCALL_MISSING }}").unwrap_err();
            let message = err.to_string();
            assert!(message.contains("line 2"));
            assert!(message.contains("FNCALL_MISSING"));
        });
    }

    #[test]
    fn default_used_when_variable_missing() {
        temp_env::with_var_unset("FNCALL_EXPERT", || {
            let result = expand_env("select_expert: {{ env.FNCALL_EXPERT | default(\"Meta-Llama-3.1-8B-Instruct\") }}")
                .unwrap();
            assert_eq!(result, "select_expert: Meta-Llama-3.1-8B-Instruct");
        });
    }

    #[test]
    fn default_ignored_when_variable_present() {
        temp_env::with_var("FNCALL_EXPERT", Some("Meta-Llama-3.1-405B-Instruct"), || {
            let result = expand_env("select_expert: {{ env.FNCALL_EXPERT | default(\"fallback\") }}").unwrap();
            assert_eq!(result, "select_expert: Meta-Llama-3.1-405B-Instruct");
        });
    }

    #[test]
    fn unsupported_scope() {
        let err = expand_env("key: {{ secrets.TOKEN }}").unwrap_err();
        assert!(err.to_string().contains("only variables scoped with 'env.'"));
    }

    #[test]
    fn comment_lines_are_not_expanded() {
        temp_env::with_var_unset("FNCALL_MISSING", || {
            let input = "  # select_expert: {{ env.FNCALL_MISSING }}\nprod_mode: false\n";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }
}
