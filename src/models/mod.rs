//! Data models module
//!
//! Defines the chat API data structures and the provider wire formats

pub mod anthropic;
pub mod chat;
pub mod gemini;
pub mod openai;

pub use chat::{AttemptError, ChatRequest, DispatchOutcome, ProviderId, ProviderReply};
