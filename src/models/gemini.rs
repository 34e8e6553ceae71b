//! Gemini API data models
//!
//! Request and response structures for the Gemini generateContent API

use serde::{Deserialize, Serialize};

/// generateContent request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents
    pub contents: Vec<Content>,
    /// System instruction (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
}

impl GenerateContentRequest {
    /// Build a single-turn request
    pub fn single_turn(prompt: &str, system: Option<&str>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: system.map(|text| Content {
                role: None,
                parts: vec![Part {
                    text: text.to_string(),
                }],
            }),
        }
    }
}

/// A content entry and its parts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Role (user/model); omitted for system instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content parts
    pub parts: Vec<Part>,
}

/// One text part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Part text; non-text parts decode as empty
    #[serde(default)]
    pub text: String,
}

/// generateContent response body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Answer candidates
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    pub fn first_text(&self) -> String {
        self.candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

/// One answer candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content; safety-blocked candidates omit it
    #[serde(default)]
    pub content: CandidateContent,
    /// Finish reason (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Candidate content parts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateContent {
    /// Content parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Error response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiErrorResponse {
    /// Error information
    pub error: GeminiError,
}

/// Error information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiError {
    /// HTTP status code
    #[serde(default)]
    pub code: i32,
    /// Error message
    pub message: String,
    /// Status name (optional)
    #[serde(default)]
    pub status: String,
}
