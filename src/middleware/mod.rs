//! Middleware module
//!
//! Request-level middleware applied around the route handlers

pub mod logging;

pub use logging::request_logging_middleware;
