//! Service Configuration
//!
//! All deployment knobs resolve once at startup from environment variables
//! and are passed to the components that need them.

use std::env;
use thiserror::Error;

/// Errors raised while resolving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Selected deduplication backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupBackend {
    /// No retention; every delivery is processed, including retries
    None,
    /// Capacity-bounded in-process set, lost on restart
    Memory,
    /// Redis with per-key expiry, survives restart
    Redis,
}

impl DedupBackend {
    /// Parse a backend name (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "none" => Some(Self::None),
            "memory" => Some(Self::Memory),
            "redis" => Some(Self::Redis),
            _ => None,
        }
    }
}

/// Service configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot credential
    pub bot_token: String,

    /// Destination chat identifier
    pub chat_id: String,

    /// Server bind address (e.g., "0.0.0.0:3000")
    pub bind_address: String,

    /// Which dedup backend to run
    pub dedup_backend: DedupBackend,

    /// Retention for the memory backend
    pub dedup_capacity: usize,

    /// Per-key expiry for the Redis backend, in seconds
    pub dedup_ttl_secs: u64,

    /// Redis connection URL (Redis backend only)
    pub redis_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bot_token: require("TELEGRAM_BOT_TOKEN")?,
            chat_id: require("TELEGRAM_CHAT_ID")?,
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".into()),
            dedup_backend: parse_backend()?,
            dedup_capacity: parse_or("DEDUP_CAPACITY", crate::dedup::DEFAULT_CAPACITY)?,
            dedup_ttl_secs: parse_or("DEDUP_TTL_SECS", crate::dedup::DEFAULT_TTL_SECS)?,
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into()),
        })
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    env::var(var).map_err(|_| ConfigError::MissingVar(var))
}

fn parse_backend() -> Result<DedupBackend, ConfigError> {
    match env::var("DEDUP_BACKEND") {
        Ok(value) => DedupBackend::parse(&value).ok_or(ConfigError::InvalidValue {
            var: "DEDUP_BACKEND",
            value,
        }),
        Err(_) => Ok(DedupBackend::Memory),
    }
}

fn parse_or<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        Err(_) => Ok(default),
    }
}
