//! Deduplication Store
//!
//! Tracks which transaction signatures have already been handled so retried
//! webhook deliveries do not re-alert. Three interchangeable backends:
//! no-op, a capacity-bounded in-process set, and Redis with per-key expiry.
//! One backend is selected at startup from configuration.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

use crate::config::{Config, DedupBackend};

/// Default retention for the in-process backend
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default per-key expiry for the Redis backend, in seconds
pub const DEFAULT_TTL_SECS: u64 = 900;

/// Key prefix for Redis dedup records
pub const KEY_PREFIX: &str = "wdr:seen:";

/// Errors that can occur while consulting or updating the store
#[derive(Error, Debug)]
pub enum DedupError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Answer "has this signature been processed?" and record that it now has
///
/// Backends are strategy variants of one capability; they differ only in
/// retention and durability. A signature reported present must cause the
/// caller to skip the event entirely.
#[async_trait]
pub trait DedupStore: Send + Sync {
    /// Whether the signature is already recorded
    async fn has(&self, signature: &str) -> Result<bool, DedupError>;

    /// Record the signature as processed
    async fn mark_processed(&self, signature: &str) -> Result<(), DedupError>;

    /// Backend identifier for logs and the health endpoint
    fn backend_name(&self) -> &'static str;
}

/// Build the backend selected by configuration
pub async fn from_config(config: &Config) -> Result<Arc<dyn DedupStore>, DedupError> {
    match config.dedup_backend {
        DedupBackend::None => Ok(Arc::new(NoopDedup)),
        DedupBackend::Memory => Ok(Arc::new(MemoryDedup::new(config.dedup_capacity))),
        DedupBackend::Redis => {
            let store = RedisDedup::connect(&config.redis_url, config.dedup_ttl_secs).await?;
            Ok(Arc::new(store))
        }
    }
}

// ==================== No-op backend ====================

/// Backend that remembers nothing: every delivery is processed fresh
#[derive(Debug, Default)]
pub struct NoopDedup;

#[async_trait]
impl DedupStore for NoopDedup {
    async fn has(&self, _signature: &str) -> Result<bool, DedupError> {
        Ok(false)
    }

    async fn mark_processed(&self, _signature: &str) -> Result<(), DedupError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "none"
    }
}

// ==================== In-process backend ====================

struct MemoryInner {
    seen: HashSet<String>,
    order: VecDeque<String>,
}

/// Capacity-bounded in-process set with insertion-order eviction
///
/// Inserting past capacity evicts the oldest entries immediately, so the
/// set never exceeds its bound. State is process-local and lost on
/// restart. The lock is never held across an await point.
pub struct MemoryDedup {
    capacity: usize,
    inner: Mutex<MemoryInner>,
}

impl MemoryDedup {
    /// Create a store retaining at most `capacity` signatures
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(MemoryInner {
                seen: HashSet::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Create a store with the default retention
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Number of signatures currently retained
    pub fn len(&self) -> usize {
        self.lock().seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        // Recover the guard if a previous holder panicked; the set stays
        // internally consistent either way.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DedupStore for MemoryDedup {
    async fn has(&self, signature: &str) -> Result<bool, DedupError> {
        Ok(self.lock().seen.contains(signature))
    }

    async fn mark_processed(&self, signature: &str) -> Result<(), DedupError> {
        let mut inner = self.lock();
        if inner.seen.insert(signature.to_string()) {
            inner.order.push_back(signature.to_string());
            while inner.order.len() > self.capacity {
                if let Some(oldest) = inner.order.pop_front() {
                    inner.seen.remove(&oldest);
                }
            }
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

// ==================== Redis backend ====================

/// Redis-backed store with per-key expiry
///
/// Survives process restart; the dedup window is wall-clock bounded rather
/// than count bounded. The record write is conditional (`SET NX`) so
/// concurrent redeliveries of the same signature cannot both land a fresh
/// record once one write succeeds.
pub struct RedisDedup {
    conn: MultiplexedConnection,
    ttl_secs: u64,
}

impl RedisDedup {
    /// Connect to Redis and build the store
    ///
    /// # Arguments
    /// * `redis_url` - Connection URL (e.g., "redis://127.0.0.1:6379")
    /// * `ttl_secs` - Per-key expiry in seconds
    pub async fn connect(redis_url: &str, ttl_secs: u64) -> Result<Self, DedupError> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self { conn, ttl_secs })
    }

    /// The Redis key for a signature
    pub fn key(signature: &str) -> String {
        format!("{}{}", KEY_PREFIX, signature)
    }
}

#[async_trait]
impl DedupStore for RedisDedup {
    async fn has(&self, signature: &str) -> Result<bool, DedupError> {
        let mut conn = self.conn.clone();
        let exists: bool = redis::cmd("EXISTS")
            .arg(Self::key(signature))
            .query_async(&mut conn)
            .await?;
        Ok(exists)
    }

    async fn mark_processed(&self, signature: &str) -> Result<(), DedupError> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("SET")
            .arg(Self::key(signature))
            .arg(1)
            .arg("NX")
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
