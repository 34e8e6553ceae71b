//! Groq Provider implementation
//!
//! OpenAI-compatible chat completions adapter for the Groq API

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use super::Provider;
use crate::config::settings::VendorConfig;
use crate::models::openai::{ChatCompletionErrorResponse, ChatCompletionRequest, ChatCompletionResponse};
use crate::models::{ProviderId, ProviderReply};

/// Groq Provider
pub struct GroqProvider {
    client: Client,
    config: VendorConfig,
}

impl GroqProvider {
    /// Create a new Groq provider
    pub fn new(config: VendorConfig, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("aifallback/0.1.0")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Build the request URL
    fn build_url(&self) -> String {
        let base_url = self.config.base_url.trim_end_matches('/');
        format!("{}/chat/completions", base_url)
    }
}

#[async_trait]
impl Provider for GroqProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Groq
    }

    async fn invoke(&self, prompt: &str, system: Option<&str>) -> Result<ProviderReply> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .context("GROQ_API_KEY missing")?;

        debug!("Sending Groq chat completion request");

        let request = ChatCompletionRequest::single_turn(&self.config.model, prompt, system);

        let response = self
            .client
            .post(self.build_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send Groq request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_response) = serde_json::from_str::<ChatCompletionErrorResponse>(&error_text) {
                error!("Groq API error: {}", error_response.error.message);
                anyhow::bail!("Groq API error: {}", error_response.error.message);
            }

            error!("Groq API request failed: {} - {}", status, error_text);
            anyhow::bail!("Groq API request failed: {} - {}", status, error_text);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse Groq response")?;

        let text = completion.first_text().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            anyhow::bail!("Groq returned empty response");
        }

        let model = if completion.model.is_empty() {
            self.config.model.clone()
        } else {
            completion.model.clone()
        };

        debug!("Groq request completed successfully");

        Ok(ProviderReply {
            provider: ProviderId::Groq,
            model,
            text: text.to_string(),
        })
    }
}
