//! Chat endpoint handler
//!
//! Answers a prompt through the provider fallback chain

use crate::handlers::AppState;
use crate::models::{ChatRequest, DispatchOutcome};
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::{create_outcome_log_summary, create_request_log_summary};
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle chat requests
///
/// POST /api/chat
///
/// Every dispatch outcome is HTTP 200, including the all-providers-failed
/// case; only request validation produces an error status.
pub async fn handle_chat(
    State(state): State<Arc<AppState>>,
    Json(chat_request): Json<ChatRequest>,
) -> AppResult<Json<DispatchOutcome>> {
    let log_summary = create_request_log_summary(&chat_request);
    if let Ok(summary_json) = serde_json::to_string(&log_summary) {
        debug!("📥 Chat request: {}", summary_json);
    }

    // Validate request
    if let Err(error_msg) = validate_chat_request(&chat_request) {
        warn!("Request validation failed: {}", error_msg);
        return Err(AppError::Validation(error_msg));
    }

    // A blank system instruction is treated as absent
    let system = chat_request
        .system
        .as_deref()
        .filter(|s| !s.trim().is_empty());

    let outcome = state.dispatcher.dispatch(&chat_request.prompt, system).await;

    let log_summary = create_outcome_log_summary(&outcome);
    if let Ok(summary_json) = serde_json::to_string(&log_summary) {
        debug!("📤 Chat outcome: {}", summary_json);
    }

    Ok(Json(outcome))
}

/// Validate chat request
fn validate_chat_request(request: &ChatRequest) -> Result<(), String> {
    // Check prompt; a missing field deserializes to an empty string
    if request.prompt.trim().is_empty() {
        return Err("Prompt cannot be empty".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_chat_request() {
        // Valid request
        let valid_request = ChatRequest {
            prompt: "Hello".to_string(),
            system: None,
        };
        assert!(validate_chat_request(&valid_request).is_ok());

        // Invalid request - empty prompt
        let invalid_request = ChatRequest {
            prompt: "".to_string(),
            system: None,
        };
        assert!(validate_chat_request(&invalid_request).is_err());

        // Invalid request - whitespace-only prompt
        let invalid_request = ChatRequest {
            prompt: "   \n\t".to_string(),
            system: None,
        };
        assert!(validate_chat_request(&invalid_request).is_err());
    }

    #[test]
    fn test_missing_prompt_field_fails_validation() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(validate_chat_request(&request).is_err());
    }
}
