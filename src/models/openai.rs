//! OpenAI-compatible wire models
//!
//! Request and response structures for the chat completions API shape
//! shared by the OpenAI, Groq, and DeepSeek providers

use serde::{Deserialize, Serialize};

/// Chat completions request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model name
    pub model: String,
    /// Conversation messages
    pub messages: Vec<ChatCompletionMessage>,
}

impl ChatCompletionRequest {
    /// Build a single-turn request, with the system instruction as a
    /// leading system-role message when present
    pub fn single_turn(model: &str, prompt: &str, system: Option<&str>) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(ChatCompletionMessage {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }
        messages.push(ChatCompletionMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        });
        Self {
            model: model.to_string(),
            messages,
        }
    }
}

/// One conversation message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionMessage {
    /// Role (system/user/assistant)
    pub role: String,
    /// Message content
    pub content: String,
}

/// Chat completions response body
///
/// Only the fields this service reads are required; everything else is
/// tolerated and ignored so minor vendor differences do not break decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response ID
    #[serde(default)]
    pub id: String,
    /// Model that produced the response
    #[serde(default)]
    pub model: String,
    /// Choice list
    pub choices: Vec<ChatCompletionChoice>,
    /// Usage statistics (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<ChatCompletionUsage>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if any
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .map(|message| message.content.as_str())
    }
}

/// One response choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Generated message (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<ChatCompletionMessage>,
    /// Finish reason (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionUsage {
    /// Prompt token count
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Completion token count
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total token count
    #[serde(default)]
    pub total_tokens: u32,
}

/// Error response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionErrorResponse {
    /// Error information
    pub error: ChatCompletionError,
}

/// Error information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionError {
    /// Error message
    pub message: String,
    /// Error type (optional, shape varies per vendor)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Error code (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<serde_json::Value>,
}
