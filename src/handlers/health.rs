//! Health check handlers
//!
//! Provides application health status check endpoints

use crate::handlers::AppState;
use crate::models::ProviderId;
use axum::{extract::State, http::StatusCode, response::Json};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Process start reference for uptime reporting, forced at router creation
pub(crate) static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Check result
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDetails {
    /// Number of providers in the fallback chain
    pub providers: usize,
    /// Configured provider order
    pub order: Vec<ProviderId>,
    /// Configuration status
    pub config: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Basic health check
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    let response = HealthResponse {
        status: "healthy".to_string(),
        service: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(HealthDetails {
            providers: state.dispatcher.provider_count(),
            order: state.dispatcher.order().to_vec(),
            config: "valid".to_string(),
            uptime_seconds: get_uptime_seconds(),
        }),
    };

    Json(response)
}

/// Readiness check
///
/// GET /health/ready
/// Check if the service is ready to receive requests
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, StatusCode> {
    debug!("Executing readiness check");

    // An empty chain is rejected at startup, so this only trips if that
    // validation ever regresses
    let provider_count = state.dispatcher.provider_count();
    if provider_count == 0 {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let response = HealthResponse {
        status: "ready".to_string(),
        service: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(HealthDetails {
            providers: provider_count,
            order: state.dispatcher.order().to_vec(),
            config: "valid".to_string(),
            uptime_seconds: get_uptime_seconds(),
        }),
    };

    Ok(Json(response))
}

/// Liveness check
///
/// GET /health/live
/// Check if the service is still running, without touching dependencies
pub async fn liveness_check(
    State(_state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, StatusCode> {
    debug!("Executing liveness check");

    let response = HealthResponse {
        status: "alive".to_string(),
        service: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: None,
    };

    Ok(Json(response))
}

/// Get service uptime in seconds
fn get_uptime_seconds() -> u64 {
    START_TIME.elapsed().as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::*;
    use crate::providers::build_providers;
    use crate::services::FallbackDispatcher;
    use std::time::Duration;

    fn create_test_state() -> Arc<AppState> {
        let vendor = |base: &str, model: &str| VendorConfig {
            api_key: None,
            base_url: base.to_string(),
            model: model.to_string(),
        };

        let settings = Settings {
            server: ServerConfig {
                host: "localhost".to_string(),
                port: 8080,
            },
            dispatch: DispatchConfig {
                order: ProviderId::ALL.to_vec(),
                attempt_timeout_ms: 25_000,
            },
            providers: ProviderSettings {
                openai: vendor("https://api.openai.com/v1", "gpt-4o-mini"),
                anthropic: vendor("https://api.anthropic.com/v1", "claude-3-5-haiku-20241022"),
                gemini: vendor(
                    "https://generativelanguage.googleapis.com/v1beta",
                    "gemini-2.0-flash",
                ),
                groq: vendor("https://api.groq.com/openai/v1", "llama-3.3-70b-versatile"),
                deepseek: vendor("https://api.deepseek.com/v1", "deepseek-chat"),
            },
            request: RequestConfig {
                max_request_size: 1024,
                timeout: 30,
            },
            security: SecurityConfig {
                allowed_origins: vec!["*".to_string()],
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
        };

        let registry = build_providers(&settings).unwrap();
        let dispatcher = FallbackDispatcher::new(
            &settings.dispatch.order,
            &registry,
            Duration::from_millis(settings.dispatch.attempt_timeout_ms),
        )
        .unwrap();

        Arc::new(AppState {
            settings,
            dispatcher: Arc::new(dispatcher),
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let state = create_test_state();
        let result = health_check(State(state)).await;

        let response = result.0;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "aifallback");

        let details = response.details.unwrap();
        assert_eq!(details.providers, 5);
        assert_eq!(details.order, ProviderId::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_readiness_check() {
        let state = create_test_state();
        let result = readiness_check(State(state)).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().0.status, "ready");
    }

    #[tokio::test]
    async fn test_liveness_check() {
        let state = create_test_state();
        let result = liveness_check(State(state)).await;

        assert!(result.is_ok());
        let response = result.unwrap().0;
        assert_eq!(response.status, "alive");
        assert!(response.details.is_none());
    }

    #[test]
    fn test_uptime_calculation() {
        let uptime1 = get_uptime_seconds();
        std::thread::sleep(std::time::Duration::from_millis(100));
        let uptime2 = get_uptime_seconds();

        assert!(uptime2 >= uptime1);
    }
}
