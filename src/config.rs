// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

/// Settings for the completion-service client, selected per environment
/// from `config.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: ModelConfig,
    production: ModelConfig,
}

impl ModelConfig {
    /// Load configuration for the current environment.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);
        Self::load_from_file(&environment)
    }

    fn get_environment() -> String {
        std::env::var("RESUME_MATCH_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(environment: &str) -> Result<Self> {
        let config_path = PathBuf::from("config.yaml");
        if !config_path.exists() {
            anyhow::bail!(
                "config.yaml not found in current directory. Server cannot start without configuration."
            );
        }

        let config_content =
            std::fs::read_to_string(&config_path).context("Failed to read config.yaml")?;

        let config_file: ConfigFile =
            serde_yaml::from_str(&config_content).context("Failed to parse config.yaml")?;

        Ok(config_file.section_for(environment))
    }
}

impl ConfigFile {
    /// Pick the section for an environment name; anything other than
    /// `production` falls back to `local`.
    fn section_for(self, environment: &str) -> ModelConfig {
        match environment {
            "production" => self.production,
            _ => self.local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_file() {
        let yaml = r#"
local:
  model: gemini-2.0-flash
  base_url: https://generativelanguage.googleapis.com
  timeout_seconds: 60
production:
  model: gemini-2.0-flash
  base_url: https://generativelanguage.googleapis.com
  timeout_seconds: 120
"#;
        let config_file: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config_file.local.model, "gemini-2.0-flash");
        assert_eq!(config_file.production.timeout_seconds, 120);
    }

    fn sample_config_file() -> ConfigFile {
        ConfigFile {
            local: ModelConfig {
                model: "gemini-2.0-flash".to_string(),
                base_url: "https://generativelanguage.googleapis.com".to_string(),
                timeout_seconds: 60,
            },
            production: ModelConfig {
                model: "gemini-2.0-flash".to_string(),
                base_url: "https://generativelanguage.googleapis.com".to_string(),
                timeout_seconds: 120,
            },
        }
    }

    #[test]
    fn test_production_selects_production_section() {
        let config = sample_config_file().section_for("production");
        assert_eq!(config.timeout_seconds, 120);
    }

    #[test]
    fn test_unknown_environment_falls_back_to_local() {
        assert_eq!(sample_config_file().section_for("local").timeout_seconds, 60);
        assert_eq!(sample_config_file().section_for("staging").timeout_seconds, 60);
        assert_eq!(sample_config_file().section_for("").timeout_seconds, 60);
    }
}
