//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::ProviderId;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Fallback dispatch configuration
    pub dispatch: DispatchConfig,
    /// Per-provider configuration
    pub providers: ProviderSettings,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Fallback dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Provider priority order
    pub order: Vec<ProviderId>,
    /// Per-attempt timeout in milliseconds
    pub attempt_timeout_ms: u64,
}

/// Configuration for a single provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorConfig {
    /// API key; absent keys are reported per attempt, not at startup
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Model name
    pub model: String,
}

/// Configuration for all known providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// OpenAI configuration
    pub openai: VendorConfig,
    /// Anthropic configuration
    pub anthropic: VendorConfig,
    /// Gemini configuration
    pub gemini: VendorConfig,
    /// Groq configuration
    pub groq: VendorConfig,
    /// DeepSeek configuration
    pub deepseek: VendorConfig,
}

impl ProviderSettings {
    /// Configuration block for one provider
    pub fn get(&self, id: ProviderId) -> &VendorConfig {
        match id {
            ProviderId::OpenAi => &self.openai,
            ProviderId::Anthropic => &self.anthropic,
            ProviderId::Gemini => &self.gemini,
            ProviderId::Groq => &self.groq,
            ProviderId::DeepSeek => &self.deepseek,
        }
    }
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
    /// Outbound request timeout in seconds
    pub timeout: u64,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS, "*" means any
    pub allowed_origins: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let order = get_env_or_default("PROVIDER_ORDER", "openai,anthropic,gemini,groq,deepseek")
            .split(',')
            .filter(|name| !name.trim().is_empty())
            .map(|name| name.parse::<ProviderId>())
            .collect::<Result<Vec<_>>>()
            .context("Invalid PROVIDER_ORDER value")?;

        let settings = Self {
            server: ServerConfig {
                host: get_env_or_default("SERVER_HOST", "0.0.0.0"),
                port: get_env_or_default("SERVER_PORT", "8080")
                    .parse()
                    .context("Invalid port number")?,
            },
            dispatch: DispatchConfig {
                order,
                attempt_timeout_ms: get_env_or_default("ATTEMPT_TIMEOUT_MS", "25000")
                    .parse()
                    .context("Invalid attempt timeout")?,
            },
            providers: ProviderSettings {
                openai: vendor_config("OPENAI", "https://api.openai.com/v1", "gpt-4o-mini"),
                anthropic: vendor_config(
                    "ANTHROPIC",
                    "https://api.anthropic.com/v1",
                    "claude-3-5-haiku-20241022",
                ),
                gemini: vendor_config(
                    "GEMINI",
                    "https://generativelanguage.googleapis.com/v1beta",
                    "gemini-2.0-flash",
                ),
                groq: vendor_config(
                    "GROQ",
                    "https://api.groq.com/openai/v1",
                    "llama-3.3-70b-versatile",
                ),
                deepseek: vendor_config("DEEPSEEK", "https://api.deepseek.com/v1", "deepseek-chat"),
            },
            request: RequestConfig {
                max_request_size: get_env_or_default("MAX_REQUEST_SIZE", "1048576")
                    .parse()
                    .context("Invalid maximum request size")?,
                timeout: get_env_or_default("REQUEST_TIMEOUT", "30")
                    .parse()
                    .context("Invalid request timeout")?,
            },
            security: SecurityConfig {
                allowed_origins: get_env_or_default("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        // Validate port range
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        // Validate provider order
        if self.dispatch.order.is_empty() {
            anyhow::bail!("Provider order cannot be empty");
        }

        let mut seen = HashSet::new();
        for id in &self.dispatch.order {
            if !seen.insert(id) {
                anyhow::bail!("Duplicate provider in order: {}", id);
            }
        }

        // Validate timeout values
        if self.dispatch.attempt_timeout_ms == 0 {
            anyhow::bail!("Attempt timeout cannot be 0");
        }

        if self.request.timeout == 0 {
            anyhow::bail!("Request timeout cannot be 0");
        }

        // Validate request size limit
        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        // Validate base URL formats
        for id in ProviderId::ALL {
            let vendor = self.providers.get(id);
            if !vendor.base_url.starts_with("http") {
                anyhow::bail!("Invalid {} base URL format, should start with 'http'", id);
            }
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        // Validate log format
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Load one provider block from `{PREFIX}_API_KEY/_BASE_URL/_MODEL`
fn vendor_config(prefix: &str, default_base_url: &str, default_model: &str) -> VendorConfig {
    VendorConfig {
        api_key: std::env::var(format!("{}_API_KEY", prefix))
            .ok()
            .filter(|key| !key.trim().is_empty()),
        base_url: get_env_or_default(&format!("{}_BASE_URL", prefix), default_base_url),
        model: get_env_or_default(&format!("{}_MODEL", prefix), default_model),
    }
}
