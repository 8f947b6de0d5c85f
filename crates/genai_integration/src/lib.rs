use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{GenerateContentRequest, GenerateContentResponse};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Error)]
pub enum GenerationError {
    /// No credential was supplied. Detected locally; nothing was sent.
    #[error("text generation is not configured: missing API key")]
    NotConfigured,
    #[error("text generation request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("text generation service answered with status {status}")]
    Status { status: u16 },
    #[error("text generation response could not be decoded: {0}")]
    MalformedResponse(#[source] reqwest::Error),
    #[error("text generation response carried no text")]
    EmptyResponse,
}

impl GenerationError {
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured)
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError>;
}

pub struct UnconfiguredTextGenerator;

#[async_trait]
impl TextGenerator for UnconfiguredTextGenerator {
    async fn generate_text(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured)
    }
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl GeminiConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

pub struct GeminiTextGenerator {
    http: Client,
    config: GeminiConfig,
}

impl GeminiTextGenerator {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(GenerationError::NotConfigured);
        };

        debug!(model = %self.config.model, "requesting generated text");
        let response = self
            .http
            .post(self.config.generate_url())
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(GenerationError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(GenerationError::MalformedResponse)?;

        body.first_text().ok_or(GenerationError::EmptyResponse)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
