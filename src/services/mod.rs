//! Service layer module
//!
//! Contains the fallback dispatch logic

pub mod dispatcher;

pub use dispatcher::{FallbackDispatcher, FALLBACK_TEXT};
