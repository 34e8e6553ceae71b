//! Gemini Provider implementation
//!
//! Adapter for the Google Gemini generateContent API

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use super::Provider;
use crate::config::settings::VendorConfig;
use crate::models::gemini::{GeminiErrorResponse, GenerateContentRequest, GenerateContentResponse};
use crate::models::{ProviderId, ProviderReply};

/// Gemini Provider
pub struct GeminiProvider {
    client: Client,
    config: VendorConfig,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(config: VendorConfig, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("aifallback/0.1.0")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Build the request URL
    ///
    /// The API key travels as a query parameter, so the full URL must never
    /// be logged.
    fn build_url(&self, api_key: &str) -> String {
        let base_url = self.config.base_url.trim_end_matches('/');
        format!(
            "{}/models/{}:generateContent?key={}",
            base_url, self.config.model, api_key
        )
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    async fn invoke(&self, prompt: &str, system: Option<&str>) -> Result<ProviderReply> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .context("GEMINI_API_KEY missing")?;

        debug!("Sending Gemini generateContent request");

        let request = GenerateContentRequest::single_turn(prompt, system);

        let response = self
            .client
            .post(self.build_url(api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            // reqwest errors embed the request URL, which carries the key
            .map_err(|e| anyhow::anyhow!("Failed to send Gemini request: {}", e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&error_text) {
                error!("Gemini API error: {}", error_response.error.message);
                anyhow::bail!("Gemini API error: {}", error_response.error.message);
            }

            error!("Gemini API request failed: {} - {}", status, error_text);
            anyhow::bail!("Gemini API request failed: {} - {}", status, error_text);
        }

        let generated: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse Gemini response: {}", e.without_url()))?;

        let text = generated.first_text();
        let text = text.trim();
        if text.is_empty() {
            anyhow::bail!("Gemini returned empty response");
        }

        debug!("Gemini request completed successfully");

        Ok(ProviderReply {
            provider: ProviderId::Gemini,
            model: self.config.model.clone(),
            text: text.to_string(),
        })
    }
}
