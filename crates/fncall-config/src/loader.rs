use std::{io::ErrorKind, path::Path};

use crate::Config;

/// Serialization formats a configuration file can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    ///
    /// # Errors
    ///
    /// Returns an error for extensions other than `yaml`, `yml` and `toml`
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => anyhow::bail!(
                "unsupported configuration format for {}: expected a .yaml, .yml or .toml file",
                path.display()
            ),
        }
    }
}

impl Config {
    /// Load configuration from a YAML or TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable, has an
    /// unsupported extension, references an unset variable, does not
    /// match the schema, or fails validation
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config = Self::read(path)?;
        config.validate().map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
        Ok(config)
    }

    /// Load configuration from a file without validating it
    ///
    /// Used by tooling that reports every finding through [`Config::issues`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, expanded or parsed
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let format = ConfigFormat::from_path(path)?;

        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => anyhow::anyhow!("configuration file {} was not found", path.display()),
            _ => anyhow::anyhow!("failed to read config file {}: {e}", path.display()),
        })?;

        let config = Self::deserialize_text(&raw, format).map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            %format,
            api = %config.llm.api,
            prod_mode = config.prod_mode,
            "configuration loaded"
        );

        Ok(config)
    }

    /// Parse and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns an error if variable expansion, parsing or validation fails
    pub fn parse(raw: &str, format: ConfigFormat) -> anyhow::Result<Self> {
        let config = Self::deserialize_text(raw, format)?;
        config.validate()?;
        Ok(config)
    }

    fn deserialize_text(raw: &str, format: ConfigFormat) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config = match format {
            ConfigFormat::Yaml => {
                serde_yaml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?
            }
            ConfigFormat::Toml => {
                toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?
            }
        };

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("config.yaml")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("kit/config.YML")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("config.toml")).unwrap(), ConfigFormat::Toml);
    }

    #[test]
    fn format_rejects_other_extensions() {
        let err = ConfigFormat::from_path(Path::new("config.json")).unwrap_err();
        assert!(err.to_string().contains("unsupported configuration format"));

        assert!(ConfigFormat::from_path(Path::new("config")).is_err());
    }
}
