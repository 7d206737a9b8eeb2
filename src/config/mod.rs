mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path, str::FromStr};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the configuration: optional YAML file, then environment overrides.
///
/// The file comes from `CONFIG_PATH` when set, otherwise `config.yaml` in the
/// working directory if it exists. Environment variables always win.
pub async fn load() -> Result<Config> {
    let mut config = match env::var("CONFIG_PATH") {
        Ok(path) => load_file(&path).await?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            load_file(DEFAULT_CONFIG_PATH).await?
        }
        Err(_) => {
            debug!("No configuration file found, using defaults");
            Config::default()
        }
    };

    config.apply_env(|key| env::var(key).ok())?;
    config.validate()?;

    Ok(config)
}

pub async fn load_file(path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", path);

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

impl Config {
    /// Overlays `LLM_*` variables resolved through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("LLM_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Some(api_key) = lookup("LLM_API_KEY") {
            self.llm.api_key = api_key;
        }
        if let Some(model) = lookup("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(host) = lookup("LLM_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("LLM_PORT") {
            self.server.port = parse_var("LLM_PORT", &port)?;
        }
        if let Some(temperature) = lookup("LLM_TEMPERATURE") {
            self.llm.sampling.temperature = parse_var("LLM_TEMPERATURE", &temperature)?;
        }
        if let Some(max_tokens) = lookup("LLM_MAX_TOKENS") {
            self.llm.sampling.max_tokens = parse_var("LLM_MAX_TOKENS", &max_tokens)?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.llm.api_key.trim().is_empty() {
            return Err(Error::config("LLM API key is not set (LLM_API_KEY)"));
        }
        if self.llm.model.trim().is_empty() {
            return Err(Error::config("LLM model is not set (LLM_MODEL)"));
        }
        Ok(())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::config(format!("Invalid {key} value '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.logs.level, "info");
        assert_eq!(config.llm.sampling.temperature, 0.7);
        assert_eq!(config.llm.sampling.max_tokens, 300);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(lookup_from(&[
                ("LLM_BASE_URL", "http://localhost:9000/v1"),
                ("LLM_API_KEY", "sk-test"),
                ("LLM_MODEL", "gpt-4o-mini"),
                ("LLM_PORT", "4000"),
                ("LLM_MAX_TOKENS", "512"),
            ]))
            .unwrap();

        assert_eq!(config.llm.base_url, "http://localhost:9000/v1");
        assert_eq!(config.llm.api_key, "sk-test");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.llm.sampling.max_tokens, 512);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let mut config = Config::default();
        let err = config
            .apply_env(lookup_from(&[("LLM_PORT", "not-a-port")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("LLM_PORT"));
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let mut config = Config::default();
        config.llm.model = "gpt-4o-mini".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("LLM_API_KEY"));
    }

    #[test]
    fn test_missing_model_fails_validation() {
        let mut config = Config::default();
        config.llm.api_key = "sk-test".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("LLM_MODEL"));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
llm:
  api_key: "sk-yaml"
  model: "gpt-4o"
  sampling:
    temperature: 0.2
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.llm.api_key, "sk-yaml");
        assert_eq!(config.llm.sampling.temperature, 0.2);
        assert_eq!(config.llm.sampling.max_tokens, 300);
        assert_eq!(config.server.port, 3001);
    }
}
