//! Client for a text-generation-inference server
//!
//! Sends `POST /generate` requests and returns the prompt echo followed by
//! the generated text, the way a local pipeline with full-text output would.

use crate::config::{FileGenerationConfig, FileModelConfig};
use async_trait::async_trait;
use narrative_application::ports::text_generator::{GenerationError, TextGenerator};
use narrative_domain::{ChatTemplate, ModelIdentity};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters<'a>,
}

#[derive(Debug, Serialize)]
struct GenerateParameters<'a> {
    max_new_tokens: u32,
    return_full_text: bool,
    do_sample: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    adapter_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// [`TextGenerator`] backed by a text-generation-inference server
pub struct TgiTextGenerator {
    client: reqwest::Client,
    base_url: String,
    model: ModelIdentity,
    /// Sent as `adapter_id` so a multi-adapter server picks the fine-tune
    adapter_id: Option<String>,
    /// Removed from the prompt echo
    special_tokens: &'static [&'static str],
}

impl TgiTextGenerator {
    pub fn new(base_url: impl Into<String>, model: ModelIdentity, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model,
            adapter_id: None,
            special_tokens: &[],
        }
    }

    /// Request the model's adapter by name on every call
    pub fn with_adapter_id(mut self) -> Self {
        self.adapter_id = self.model.adapter().map(str::to_string);
        self
    }

    /// Drop the template's special tokens from the echoed prompt
    pub fn skipping_special_tokens(mut self, template: ChatTemplate) -> Self {
        self.special_tokens = template.special_tokens();
        self
    }

    pub fn from_config(
        generation: &FileGenerationConfig,
        model: &FileModelConfig,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(generation.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Other(format!("Failed to build HTTP client: {}", e)))?;

        let mut generator = Self::new(&generation.url, model.identity(), client);
        if generation.use_adapter_id {
            generator = generator.with_adapter_id();
        }
        if generation.skip_special_tokens {
            generator = generator.skipping_special_tokens(model.parse_chat_template().0);
        }
        Ok(generator)
    }

    fn request_body<'a>(&'a self, prompt: &'a str, max_new_tokens: u32) -> GenerateRequest<'a> {
        GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                max_new_tokens,
                return_full_text: false,
                do_sample: false,
                adapter_id: self.adapter_id.as_deref(),
            },
        }
    }

    /// The prompt as it reads after decoding
    fn echo(&self, prompt: &str) -> String {
        self.special_tokens
            .iter()
            .fold(prompt.to_string(), |text, token| text.replace(token, ""))
    }
}

fn send_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else if e.is_connect() {
        GenerationError::ConnectionError(e.to_string())
    } else {
        GenerationError::RequestFailed(e.to_string())
    }
}

async fn failure_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    format!("HTTP {}: {}", status.as_u16(), detail.trim())
}

#[async_trait]
impl TextGenerator for TgiTextGenerator {
    fn model(&self) -> &ModelIdentity {
        &self.model
    }

    async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String, GenerationError> {
        let url = format!("{}/generate", self.base_url);
        debug!(%url, max_new_tokens, adapter = ?self.adapter_id, "Sending generation request");

        let response = self
            .client
            .post(&url)
            .json(&self.request_body(prompt, max_new_tokens))
            .send()
            .await
            .map_err(send_error)?;

        if !response.status().is_success() {
            let message = failure_message(response).await;
            warn!("Generation server error: {}", message);
            return Err(GenerationError::RequestFailed(message));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let mut text = self.echo(prompt);
        text.push_str(&body.generated_text);
        Ok(text)
    }

    async fn health(&self) -> Result<(), GenerationError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(send_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(GenerationError::RequestFailed(failure_message(response).await))
        }
    }
}
