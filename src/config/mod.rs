//! Configuration management for invnorm
//!
//! Loads the TOML run configuration, applies `INVNORM_*` environment
//! overrides and validates the result before anything else runs.

use crate::error::{InvnormError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    pub llm: LlmConfig,
    pub domains: DomainsConfig,
    pub output: OutputConfig,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Text-generation assistant configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub enabled: bool,
    pub provider: String,
    pub endpoint: String,
    /// Name of the environment variable holding the API credential
    pub api_key_env: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_retry_backoff_ms() -> u64 {
    500
}

impl LlmConfig {
    /// Credential from the configured environment variable, if set and non-empty
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// FQDN domain inference configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainsConfig {
    pub default_domain: String,
    /// Checked in order; the first region with a keyword found in the site wins
    #[serde(default)]
    pub regions: Vec<RegionDomain>,
}

/// Site keywords mapped to a regional DNS domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionDomain {
    pub keywords: Vec<String>,
    pub domain: String,
}

impl Default for DomainsConfig {
    fn default() -> Self {
        let region = |keywords: &[&str], domain: &str| RegionDomain {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            domain: domain.to_string(),
        };

        Self {
            default_domain: "corp.example.com".to_string(),
            regions: vec![
                region(&["blr", "bangalore"], "blr.corp.example.com"),
                region(&["hq", "headquarters"], "hq.corp.example.com"),
                region(&["dc", "datacenter"], "dc.corp.example.com"),
            ],
        }
    }
}

/// Default output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub clean_csv: PathBuf,
    pub anomalies_json: PathBuf,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(InvnormError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| InvnormError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();

        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| InvnormError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: INVNORM_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("INVNORM_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "LLM__ENABLED" => {
                self.llm.enabled = value.parse().map_err(|_| InvnormError::InvalidConfigValue {
                    path: path.to_string(),
                    message: format!("Cannot parse '{}' as boolean", value),
                })?;
            }
            "LLM__MODEL" => {
                self.llm.model = value.to_string();
            }
            "LLM__ENDPOINT" => {
                self.llm.endpoint = value.to_string();
            }
            "LLM__TEMPERATURE" => {
                self.llm.temperature =
                    value.parse().map_err(|_| InvnormError::InvalidConfigValue {
                        path: path.to_string(),
                        message: format!("Cannot parse '{}' as number", value),
                    })?;
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| InvnormError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("invnorm").join("config.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta: MetaConfig {
                schema_version: "1.0.0".to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            llm: LlmConfig {
                enabled: true,
                provider: "openai".to_string(),
                endpoint: "https://api.openai.com/v1".to_string(),
                api_key_env: "OPENAI_API_KEY".to_string(),
                model: "gpt-4o-mini".to_string(),
                temperature: 0.2,
                timeout_secs: 30,
                max_retries: 0,
                retry_backoff_ms: default_retry_backoff_ms(),
            },
            domains: DomainsConfig::default(),
            output: OutputConfig {
                clean_csv: PathBuf::from("inventory_clean.csv"),
                anomalies_json: PathBuf::from("anomalies.json"),
            },
        }
    }
}
