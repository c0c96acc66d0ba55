use crate::config::Config;
use crate::error::{InvnormError, Result, ValidationError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_llm(config, &mut errors);
        Self::validate_domains(config, &mut errors);
        Self::validate_output(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(InvnormError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_llm(config: &Config, errors: &mut Vec<ValidationError>) {
        // A missing credential is not an error: the gateway runs disabled
        // and every field takes its deterministic fallback.
        let temp = config.llm.temperature;
        if !(0.0..=2.0).contains(&temp) {
            errors.push(ValidationError::new(
                "llm.temperature",
                format!("Temperature must be between 0.0 and 2.0, got {}", temp),
            ));
        }

        let provider = &config.llm.provider;
        let valid_providers = ["openai", "groq", "ollama"];
        if !valid_providers.contains(&provider.as_str()) {
            errors.push(ValidationError::new(
                "llm.provider",
                format!(
                    "Provider must be one of {:?}, got '{}'",
                    valid_providers, provider
                ),
            ));
        }

        if config.llm.enabled {
            if config.llm.endpoint.trim().is_empty() {
                errors.push(ValidationError::new(
                    "llm.endpoint",
                    "Endpoint cannot be empty when the LLM is enabled",
                ));
            }
            if config.llm.model.trim().is_empty() {
                errors.push(ValidationError::new("llm.model", "Model name cannot be empty"));
            }
        }

        if config.llm.timeout_secs == 0 {
            errors.push(ValidationError::new(
                "llm.timeout_secs",
                "Timeout must be greater than 0",
            ));
        }

        if config.llm.max_retries > 5 {
            errors.push(ValidationError::new(
                "llm.max_retries",
                format!("At most 5 retries are allowed, got {}", config.llm.max_retries),
            ));
        }
    }

    fn validate_domains(config: &Config, errors: &mut Vec<ValidationError>) {
        if !Self::is_valid_domain(&config.domains.default_domain) {
            errors.push(ValidationError::new(
                "domains.default_domain",
                format!("Invalid domain: '{}'", config.domains.default_domain),
            ));
        }

        for (idx, region) in config.domains.regions.iter().enumerate() {
            if region.keywords.iter().all(|k| k.trim().is_empty()) {
                errors.push(ValidationError::new(
                    format!("domains.regions[{}].keywords", idx),
                    "Region needs at least one non-empty keyword",
                ));
            }
            if !Self::is_valid_domain(&region.domain) {
                errors.push(ValidationError::new(
                    format!("domains.regions[{}].domain", idx),
                    format!("Invalid domain: '{}'", region.domain),
                ));
            }
        }
    }

    fn validate_output(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.output.clean_csv.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "output.clean_csv",
                "Output CSV path cannot be empty",
            ));
        }

        if config.output.anomalies_json.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "output.anomalies_json",
                "Anomalies JSON path cannot be empty",
            ));
        }
    }

    fn is_valid_domain(domain: &str) -> bool {
        // Constructed FQDNs must pass the FQDN validator themselves
        crate::validators::validate_fqdn(domain, None, "").valid
    }
}
