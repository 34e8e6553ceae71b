//! Provider module
//!
//! Defines the Provider trait and the five vendor adapter implementations

pub mod anthropic;
pub mod deepseek;
pub mod gemini;
pub mod groq;
pub mod openai;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Settings;
use crate::models::{ProviderId, ProviderReply};

/// Provider trait for upstream AI vendors
///
/// Each adapter owns its credential lookup, endpoint URL, request encoding,
/// and answer extraction. Adapters share no state with each other.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier of this provider
    fn id(&self) -> ProviderId;

    /// Answer a prompt with an optional system instruction
    ///
    /// A missing credential is an immediate error; the provider still counts
    /// as attempted by the dispatcher.
    async fn invoke(&self, prompt: &str, system: Option<&str>) -> Result<ProviderReply>;
}

/// Build the full adapter registry from settings
pub fn build_providers(settings: &Settings) -> Result<HashMap<ProviderId, Arc<dyn Provider>>> {
    let timeout = settings.request.timeout;
    let mut registry: HashMap<ProviderId, Arc<dyn Provider>> = HashMap::new();

    for id in ProviderId::ALL {
        let config = settings.providers.get(id).clone();
        let provider: Arc<dyn Provider> = match id {
            ProviderId::OpenAi => Arc::new(OpenAIProvider::new(config, timeout)?),
            ProviderId::Anthropic => Arc::new(AnthropicProvider::new(config, timeout)?),
            ProviderId::Gemini => Arc::new(GeminiProvider::new(config, timeout)?),
            ProviderId::Groq => Arc::new(GroqProvider::new(config, timeout)?),
            ProviderId::DeepSeek => Arc::new(DeepSeekProvider::new(config, timeout)?),
        };
        registry.insert(id, provider);
    }

    Ok(registry)
}

pub use anthropic::AnthropicProvider;
pub use deepseek::DeepSeekProvider;
pub use gemini::GeminiProvider;
pub use groq::GroqProvider;
pub use openai::OpenAIProvider;
