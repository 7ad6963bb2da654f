use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::MAX_ATTEMPTS;

/// Where conversation history lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBackend {
    Memory,
    Redis { url: String },
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub session_backend: SessionBackend,
    pub session_ttl: Duration,
    pub session_sweep_interval: Duration,
    pub llm_timeout: Duration,
    pub llm_max_attempts: u32,
    /// Alternate Messages API endpoint, e.g. a corporate proxy.
    pub llm_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let session_backend = match optional_env("SESSION_BACKEND")
            .unwrap_or_else(|| "memory".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => SessionBackend::Memory,
            "redis" => SessionBackend::Redis {
                url: require_env("REDIS_URL")?,
            },
            other => bail!("SESSION_BACKEND must be 'memory' or 'redis', got '{other}'"),
        };

        let llm_max_attempts = check_max_attempts(parse_env("LLM_MAX_ATTEMPTS", 1)?)?;

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            session_backend,
            session_ttl: Duration::from_secs(parse_env("SESSION_TTL_SECS", 3600)?),
            session_sweep_interval: Duration::from_secs(parse_env("SESSION_SWEEP_SECS", 60)?),
            llm_timeout: Duration::from_secs(parse_env("LLM_TIMEOUT_SECS", 120)?),
            llm_max_attempts,
            llm_base_url: optional_env("ANTHROPIC_BASE_URL"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn check_max_attempts(attempts: u32) -> Result<u32> {
    if !(1..=MAX_ATTEMPTS).contains(&attempts) {
        bail!("LLM_MAX_ATTEMPTS must be between 1 and {MAX_ATTEMPTS}, got {attempts}");
    }
    Ok(attempts)
}
