//! Inference gateway
//!
//! Every field that may need the assistant goes through two stages. A pure
//! local stage either settles the value or escalates with a prompt and a
//! fallback; the gateway then sends the prompt, decodes the reply into the
//! call site's reply type, and takes the fallback on any failure. Failures
//! never leave this module.

mod decode;
mod device;
mod domain;
mod owner;
mod prompts;
mod provider;
mod site;

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::{DomainsConfig, LlmConfig};

pub use decode::decode_reply;
pub use device::{device_type_stage, DeviceReply, DeviceTypeInfo};
pub use domain::infer_fqdn_domain;
pub use owner::{owner_stage, OwnerInfo, OwnerReply, TEAM_KEYWORDS};
pub use provider::{ChatCompletionsGenerator, GatewayError, TextGenerator};
pub use site::{deterministic_site, site_stage, SiteReply};

/// Outcome of the local stage
#[derive(Debug)]
pub enum Stage<T> {
    Settled(T),
    Escalate(Escalation<T>),
}

/// A request for the assistant plus what to use if it cannot answer
#[derive(Debug)]
pub struct Escalation<T> {
    pub task: &'static str,
    pub prompt: String,
    pub system_prompt: String,
    pub fallback: T,
}

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Deterministic,
    Inferred,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: Source,
}

pub struct InferenceGateway {
    generator: Option<Box<dyn TextGenerator>>,
    domains: DomainsConfig,
    calls: AtomicUsize,
}

impl InferenceGateway {
    /// Gateway that never calls out; every escalation takes its fallback
    pub fn disabled() -> Self {
        Self {
            generator: None,
            domains: DomainsConfig::default(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_generator(generator: Box<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
            ..Self::disabled()
        }
    }

    pub fn with_domains(mut self, domains: DomainsConfig) -> Self {
        self.domains = domains;
        self
    }

    /// Build from configuration, disabling inference when no credential is set
    pub fn from_config(llm: &LlmConfig, domains: DomainsConfig) -> Self {
        if !llm.enabled {
            info!("Inference disabled by configuration");
            return Self::disabled().with_domains(domains);
        }

        let Some(api_key) = llm.api_key() else {
            warn!(
                "{} not set; inference disabled, falling back to deterministic rules",
                llm.api_key_env
            );
            return Self::disabled().with_domains(domains);
        };

        match ChatCompletionsGenerator::new(llm, api_key) {
            Ok(generator) => {
                info!(provider = %llm.provider, model = %llm.model, "Inference enabled");
                Self::with_generator(Box::new(generator)).with_domains(domains)
            }
            Err(e) => {
                warn!("Failed to build inference client: {}", e);
                Self::disabled().with_domains(domains)
            }
        }
    }

    pub fn domains(&self) -> &DomainsConfig {
        &self.domains
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Number of requests sent to the assistant so far
    pub fn llm_calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Raw assistant text, or `None` when disabled or the request failed
    pub fn generate(&self, prompt: &str, system_prompt: Option<&str>) -> Option<String> {
        let generator = self.generator.as_ref()?;
        self.calls.fetch_add(1, Ordering::Relaxed);

        match generator.generate(prompt, system_prompt) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Inference request failed: {}", e);
                None
            }
        }
    }

    fn resolve<T, R>(&self, stage: Stage<T>) -> Resolved<T>
    where
        R: DeserializeOwned + Into<T>,
    {
        let escalation = match stage {
            Stage::Settled(value) => {
                return Resolved {
                    value,
                    source: Source::Deterministic,
                }
            }
            Stage::Escalate(escalation) => escalation,
        };

        debug!(task = escalation.task, prompt = %escalation.prompt, "Escalating to assistant");

        let decoded = self
            .generate(&escalation.prompt, Some(&escalation.system_prompt))
            .map(|raw| decode_reply::<R>(&raw));

        match decoded {
            Some(Ok(reply)) => Resolved {
                value: reply.into(),
                source: Source::Inferred,
            },
            Some(Err(e)) => {
                warn!(task = escalation.task, "Discarding assistant reply: {}", e);
                Resolved {
                    value: escalation.fallback,
                    source: Source::Fallback,
                }
            }
            None => Resolved {
                value: escalation.fallback,
                source: Source::Fallback,
            },
        }
    }

    pub fn parse_owner(&self, raw: &str) -> Resolved<OwnerInfo> {
        self.resolve::<_, OwnerReply>(owner_stage(raw))
    }

    pub fn classify_device_type(
        &self,
        hostname: &str,
        raw_type: &str,
        notes: &str,
    ) -> Resolved<DeviceTypeInfo> {
        self.resolve::<_, DeviceReply>(device_type_stage(hostname, raw_type, notes))
    }

    pub fn normalize_site(&self, raw: &str) -> Resolved<String> {
        self.resolve::<_, SiteReply>(site_stage(raw))
    }

    pub fn infer_fqdn_domain(&self, site: &str, owner_email: &str) -> String {
        infer_fqdn_domain(site, owner_email, &self.domains)
    }
}
