//! Logging utilities
//!
//! Shared helpers for summarizing requests and outcomes in log lines

use crate::models::{ChatRequest, DispatchOutcome};

/// Truncate a string with a note about original length
///
/// Prompt content is arbitrary UTF-8, so the cut is moved back to the
/// nearest char boundary.
pub fn truncate_content(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} chars truncated)", &s[..end], s.len() - end)
}

/// Create a filtered summary of an inbound chat request for logging
pub fn create_request_log_summary(request: &ChatRequest) -> serde_json::Value {
    serde_json::json!({
        "prompt": truncate_content(&request.prompt, 200),
        "system": request.system.as_deref().map(|s| truncate_content(s, 100)),
    })
}

/// Create a filtered summary of a dispatch outcome for logging
pub fn create_outcome_log_summary(outcome: &DispatchOutcome) -> serde_json::Value {
    serde_json::json!({
        "provider": outcome.provider.map(|id| id.as_str()),
        "model": outcome.model,
        "text": truncate_content(&outcome.text, 200),
        "tried": outcome.tried.len(),
        "failed": outcome.errors.len(),
    })
}
