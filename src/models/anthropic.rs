//! Anthropic API data models
//!
//! Request and response structures for the Anthropic messages API

use serde::{Deserialize, Serialize};

/// Messages API request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesRequest {
    /// Model name
    pub model: String,
    /// Maximum tokens to generate, required by the API
    pub max_tokens: u32,
    /// System instruction (optional, top-level field)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Conversation messages
    pub messages: Vec<MessagesTurn>,
}

impl MessagesRequest {
    /// Build a single-turn request
    pub fn single_turn(model: &str, max_tokens: u32, prompt: &str, system: Option<&str>) -> Self {
        Self {
            model: model.to_string(),
            max_tokens,
            system: system.map(str::to_string),
            messages: vec![MessagesTurn {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }
}

/// One conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesTurn {
    /// Role (user/assistant)
    pub role: String,
    /// Turn content
    pub content: String,
}

/// Messages API response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    /// Model that produced the response
    #[serde(default)]
    pub model: String,
    /// Content blocks
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl MessagesResponse {
    /// Concatenated text of all text-typed content blocks
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// One response content block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Block type, only "text" blocks carry an answer
    #[serde(rename = "type")]
    pub block_type: String,
    /// Block text (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Error response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicErrorResponse {
    /// Error information
    pub error: AnthropicError,
}

/// Error information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicError {
    /// Error type
    #[serde(rename = "type", default)]
    pub error_type: String,
    /// Error message
    pub message: String,
}
