//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Bearer credential for the chat endpoint. `None` puts the service in
    /// degraded mode: conversation answers with setup help and structure
    /// requests fail.
    pub chat_api_key: Option<String>,
    pub chat_api_base: String,
    pub chat_model: String,
    pub chat_temperature: f32,
    pub chat_max_tokens: u32,
    pub chat_top_p: f32,
    pub allowed_origin: String,
    /// How long a conversation session may sit untouched before it is dropped.
    pub session_idle_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address = parse_or(&lookup, "BIND_ADDRESS", "0.0.0.0:3000")?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let allowed_origin =
            lookup("ALLOWED_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());

        let session_idle_minutes: u64 = parse_or(&lookup, "SESSION_IDLE_MINUTES", "60")?;
        if session_idle_minutes == 0 {
            return Err(ConfigError::InvalidValue(
                "SESSION_IDLE_MINUTES".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let session_idle_timeout = Duration::from_secs(session_idle_minutes * 60);

        // --- Chat Endpoint Settings ---
        let chat_api_key = lookup("GROQ_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let chat_api_base = lookup("CHAT_API_BASE")
            .unwrap_or_else(|| "https://api.groq.com/openai/v1".to_string());
        let chat_model = lookup("CHAT_MODEL").unwrap_or_else(|| "qwen/qwen3-32b".to_string());

        let chat_temperature: f32 = parse_or(&lookup, "CHAT_TEMPERATURE", "0.6")?;
        if !(0.0..=2.0).contains(&chat_temperature) {
            return Err(ConfigError::InvalidValue(
                "CHAT_TEMPERATURE".to_string(),
                "must be between 0 and 2".to_string(),
            ));
        }
        let chat_top_p: f32 = parse_or(&lookup, "CHAT_TOP_P", "0.95")?;
        if !(0.0..=1.0).contains(&chat_top_p) {
            return Err(ConfigError::InvalidValue(
                "CHAT_TOP_P".to_string(),
                "must be between 0 and 1".to_string(),
            ));
        }
        let chat_max_tokens: u32 = parse_or(&lookup, "CHAT_MAX_TOKENS", "4096")?;

        Ok(Self {
            bind_address,
            log_level,
            chat_api_key,
            chat_api_base,
            chat_model,
            chat_temperature,
            chat_max_tokens,
            chat_top_p,
            allowed_origin,
            session_idle_timeout,
        })
    }
}

fn parse_or<T, F>(lookup: &F, name: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string()))
}
