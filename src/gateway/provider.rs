//! Text-generation backends
//!
//! The gateway only needs "prompt in, text out". `ChatCompletionsGenerator`
//! speaks the OpenAI-compatible `/chat/completions` API that OpenAI, Groq and
//! Ollama all expose.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LlmConfig;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Inference unavailable: {0}")]
    Unavailable(String),

    #[error("Inference request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Inference response invalid: {0}")]
    ResponseInvalid(String),
}

impl GatewayError {
    /// Transport failures, rate limits and server errors are worth another try
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Unavailable(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::ResponseInvalid(_) => false,
        }
    }
}

/// Anything that can turn a prompt into assistant text
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String, GatewayError>;
}

pub struct ChatCompletionsGenerator {
    client: Client,
    url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_retries: u32,
    retry_backoff: Duration,
}

impl ChatCompletionsGenerator {
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            url: format!("{}/chat/completions", config.endpoint.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    fn request_body(&self, prompt: &str, system_prompt: Option<&str>) -> Value {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.push(json!({ "role": "user", "content": prompt }));

        let mut body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
        });

        if prompt.to_uppercase().contains("JSON") {
            body["response_format"] = json!({ "type": "json_object" });
        }

        body
    }

    fn send_once(&self, body: &Value) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = response
            .json()
            .map_err(|e| GatewayError::ResponseInvalid(e.to_string()))?;

        payload
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                GatewayError::ResponseInvalid("missing choices[0].message.content".to_string())
            })
    }
}

impl TextGenerator for ChatCompletionsGenerator {
    fn generate(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String, GatewayError> {
        let body = self.request_body(prompt, system_prompt);
        let mut attempt = 0;

        loop {
            debug!(model = %self.model, attempt, "Sending chat completion request");
            match self.send_once(&body) {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!("Chat completion attempt {} failed: {}", attempt, e);
                    thread::sleep(self.retry_backoff * attempt);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
