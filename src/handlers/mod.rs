//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod chat;
pub mod health;

use crate::config::Settings;
use crate::middleware::request_logging_middleware;
use crate::providers::build_providers;
use crate::services::FallbackDispatcher;
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::{routing::get, routing::post, Router};
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub dispatcher: Arc<FallbackDispatcher>,
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    // Uptime counts from router creation
    Lazy::force(&health::START_TIME);

    // Build the adapter registry and the fallback chain
    let registry = build_providers(&settings)?;
    let dispatcher = FallbackDispatcher::new(
        &settings.dispatch.order,
        &registry,
        Duration::from_millis(settings.dispatch.attempt_timeout_ms),
    )?;

    // Create application state
    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        dispatcher: Arc::new(dispatcher),
    });

    // Create routes with the middleware stack.
    // Router::layer executes the last-added layer first, so the order below is
    // reversed to keep the execution order:
    // request_logging -> trace -> cors -> body limit
    let router = Router::new()
        .route("/api/chat", post(chat::handle_chat))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(app_state)
        .layer(RequestBodyLimitLayer::new(settings.request.max_request_size))
        .layer(build_cors_layer(&settings.security.allowed_origins)?)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_logging_middleware));

    Ok(router)
}

/// Build the CORS layer from the configured origin list
fn build_cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid allowed origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}
