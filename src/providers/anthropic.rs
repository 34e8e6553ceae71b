//! Anthropic Provider implementation
//!
//! Adapter for the Anthropic messages API

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use super::Provider;
use crate::config::settings::VendorConfig;
use crate::models::anthropic::{AnthropicErrorResponse, MessagesRequest, MessagesResponse};
use crate::models::{ProviderId, ProviderReply};

/// API version header required by the messages endpoint
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// max_tokens is mandatory on this API; single-answer prompts fit well below this
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Anthropic Provider
pub struct AnthropicProvider {
    client: Client,
    config: VendorConfig,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
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
        format!("{}/messages", base_url)
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    async fn invoke(&self, prompt: &str, system: Option<&str>) -> Result<ProviderReply> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .context("ANTHROPIC_API_KEY missing")?;

        debug!("Sending Anthropic messages request");

        let request = MessagesRequest::single_turn(&self.config.model, DEFAULT_MAX_TOKENS, prompt, system);

        let response = self
            .client
            .post(self.build_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send Anthropic request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_response) = serde_json::from_str::<AnthropicErrorResponse>(&error_text) {
                error!("Anthropic API error: {}", error_response.error.message);
                anyhow::bail!("Anthropic API error: {}", error_response.error.message);
            }

            error!("Anthropic API request failed: {} - {}", status, error_text);
            anyhow::bail!("Anthropic API request failed: {} - {}", status, error_text);
        }

        let messages: MessagesResponse = response
            .json()
            .await
            .context("Failed to parse Anthropic response")?;

        let text = messages.joined_text();
        let text = text.trim();
        if text.is_empty() {
            anyhow::bail!("Anthropic returned empty response");
        }

        let model = if messages.model.is_empty() {
            self.config.model.clone()
        } else {
            messages.model.clone()
        };

        debug!("Anthropic request completed successfully");

        Ok(ProviderReply {
            provider: ProviderId::Anthropic,
            model,
            text: text.to_string(),
        })
    }
}
