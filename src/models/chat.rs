//! Chat API data models
//!
//! Defines the inbound chat request and the dispatch outcome structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a configured AI provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// OpenAI chat completions
    OpenAi,
    /// Anthropic messages
    Anthropic,
    /// Google Gemini generateContent
    Gemini,
    /// Groq (OpenAI-compatible)
    Groq,
    /// DeepSeek (OpenAI-compatible)
    DeepSeek,
}

impl ProviderId {
    /// All known providers in the default priority order
    pub const ALL: [ProviderId; 5] = [
        ProviderId::OpenAi,
        ProviderId::Anthropic,
        ProviderId::Gemini,
        ProviderId::Groq,
        ProviderId::DeepSeek,
    ];

    /// Stable lowercase name used in configuration and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Gemini => "gemini",
            ProviderId::Groq => "groq",
            ProviderId::DeepSeek => "deepseek",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderId::OpenAi),
            "anthropic" => Ok(ProviderId::Anthropic),
            "gemini" => Ok(ProviderId::Gemini),
            "groq" => Ok(ProviderId::Groq),
            "deepseek" => Ok(ProviderId::DeepSeek),
            other => Err(anyhow::anyhow!("Unknown provider name: {}", other)),
        }
    }
}

/// Inbound chat request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// User prompt; a missing field deserializes to an empty string so
    /// validation owns the rejection
    #[serde(default)]
    pub prompt: String,
    /// Optional system instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// Successful answer produced by a single provider invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderReply {
    /// Provider that answered
    pub provider: ProviderId,
    /// Model that produced the text
    pub model: String,
    /// Answer text, non-empty after trimming
    pub text: String,
}

/// One failed provider attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptError {
    /// Provider that was attempted
    pub provider: ProviderId,
    /// Failure description
    pub error: String,
}

/// Terminal result of one dispatch over the fallback chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchOutcome {
    /// Provider that answered, null when every attempt failed
    pub provider: Option<ProviderId>,
    /// Model that answered, null when every attempt failed
    pub model: Option<String>,
    /// Answer text, or the fixed fallback message
    pub text: String,
    /// Full configured provider order
    pub tried: Vec<ProviderId>,
    /// Failed attempts in attempt order
    pub errors: Vec<AttemptError>,
}

impl DispatchOutcome {
    /// Build the outcome for a successful attempt
    pub fn success(reply: ProviderReply, tried: Vec<ProviderId>, errors: Vec<AttemptError>) -> Self {
        Self {
            provider: Some(reply.provider),
            model: Some(reply.model),
            text: reply.text,
            tried,
            errors,
        }
    }

    /// Build the outcome for an exhausted chain
    pub fn exhausted(text: String, tried: Vec<ProviderId>, errors: Vec<AttemptError>) -> Self {
        Self {
            provider: None,
            model: None,
            text,
            tried,
            errors,
        }
    }

    /// Whether any provider answered
    pub fn is_success(&self) -> bool {
        self.provider.is_some()
    }
}
