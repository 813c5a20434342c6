use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inference backends the agent can talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LlmApi {
    /// Self-hosted SambaStudio endpoint
    Sambastudio,
    /// SambaNova Cloud
    Sncloud,
}

/// Model selection and generation parameters
///
/// The same shape is used for the top-level `llm` block and for
/// per-tool overrides under `tools.<name>.llm`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Inference backend
    pub api: LlmApi,
    /// Enable sampling
    pub do_sample: bool,
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum number of tokens to generate
    pub max_tokens_to_generate: u32,
    /// Target a CoE endpoint
    pub coe: bool,
    /// Expert (model variant) to route to, required when `coe` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_expert: Option<String>,
}

impl LlmConfig {
    /// Generation keyword arguments forwarded to the backend with every request
    ///
    /// `select_expert` is only included for CoE endpoints. Prompts are
    /// always sent pre-formatted, so `process_prompt` is fixed to `false`.
    pub fn model_kwargs(&self) -> Map<String, Value> {
        let mut kwargs = Map::new();
        kwargs.insert("do_sample".to_owned(), Value::Bool(self.do_sample));
        kwargs.insert(
            "max_tokens_to_generate".to_owned(),
            Value::from(self.max_tokens_to_generate),
        );
        kwargs.insert("temperature".to_owned(), Value::from(self.temperature));
        kwargs.insert("process_prompt".to_owned(), Value::Bool(false));

        if self.coe
            && let Some(ref expert) = self.select_expert
        {
            kwargs.insert("select_expert".to_owned(), Value::String(expert.clone()));
        }

        kwargs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coe_llm() -> LlmConfig {
        LlmConfig {
            api: LlmApi::Sncloud,
            do_sample: false,
            temperature: 0.0,
            max_tokens_to_generate: 1024,
            coe: true,
            select_expert: Some("Meta-Llama-3.1-70B-Instruct".to_owned()),
        }
    }

    #[test]
    fn api_round_trips_through_strings() {
        assert_eq!(LlmApi::Sncloud.to_string(), "sncloud");
        assert_eq!("sambastudio".parse::<LlmApi>().unwrap(), LlmApi::Sambastudio);
        assert!("sambaverse".parse::<LlmApi>().is_err());
    }

    #[test]
    fn model_kwargs_for_coe_endpoint() {
        let kwargs = serde_json::to_string(&coe_llm().model_kwargs()).unwrap();
        insta::assert_snapshot!(kwargs, @r#"{"do_sample":false,"max_tokens_to_generate":1024,"process_prompt":false,"select_expert":"Meta-Llama-3.1-70B-Instruct","temperature":0.0}"#);
    }

    #[test]
    fn model_kwargs_skip_expert_without_coe() {
        let llm = LlmConfig {
            coe: false,
            ..coe_llm()
        };

        let kwargs = llm.model_kwargs();
        assert!(!kwargs.contains_key("select_expert"));
        assert_eq!(kwargs["max_tokens_to_generate"], 1024);
    }

    #[test]
    fn rejects_unknown_api() {
        let yaml = "api: sambaverse\ndo_sample: false\ntemperature: 0.0\nmax_tokens_to_generate: 10\ncoe: false\n";
        let err = serde_yaml::from_str::<LlmConfig>(yaml).unwrap_err();
        assert!(err.to_string().contains("sambaverse"));
    }

    #[test]
    fn rejects_missing_generation_key() {
        let yaml = "api: sncloud\ndo_sample: false\ntemperature: 0.0\ncoe: false\n";
        let err = serde_yaml::from_str::<LlmConfig>(yaml).unwrap_err();
        assert!(err.to_string().contains("max_tokens_to_generate"));
    }
}
