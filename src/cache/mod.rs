//! Dedup cache with interchangeable backing stores.
//!
//! The cache maps `"checksum:" + fingerprint` keys to a presence marker.
//! An entry means that exact byte content has already been delivered and
//! archived; the pipeline must never re-deliver it.
//!
//! Two backends are selected at construction time: an in-process map, or
//! a shared redis instance when an endpoint is configured and reachable.
//! A connection failure at startup falls back to the in-process map with
//! a single logged warning; it is never fatal. Callers must not depend
//! on which backend is active.

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use snafu::ResultExt;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::{CacheError, CommandSnafu};

/// Key prefix for dedup entries.
pub const DEDUP_PREFIX: &str = "checksum:";

/// Build the dedup key for a content fingerprint.
pub fn dedup_key(checksum: &str) -> String {
    format!("{DEDUP_PREFIX}{checksum}")
}

#[derive(Clone)]
enum Backend {
    /// In-process map. Never fails.
    Memory(Arc<Mutex<HashMap<String, String>>>),
    /// Shared redis store.
    Redis(ConnectionManager),
}

/// Key-value store backing the dedup decision.
///
/// `get`/`set`/`clear` are the core-path operations; `incr_by` exists
/// for rate-limiting collaborators outside the per-file sequence.
/// Cloning yields a handle to the same underlying store.
#[derive(Clone)]
pub struct DedupCache {
    backend: Backend,
}

impl DedupCache {
    /// Create a cache backed by an in-process map.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(Mutex::new(HashMap::new()))),
        }
    }

    /// Create a cache, connecting to redis when a URL is given.
    ///
    /// Verifies the connection with a PING. Any failure (bad URL,
    /// unreachable server) logs the fallback decision once and returns
    /// the in-process backend.
    pub async fn connect(url: Option<&str>) -> Self {
        let Some(url) = url else {
            return Self::in_memory();
        };

        match Self::try_connect(url).await {
            Ok(manager) => {
                info!(url, "Connected to redis dedup store");
                Self {
                    backend: Backend::Redis(manager),
                }
            }
            Err(e) => {
                warn!(url, error = %e, "Redis unavailable, falling back to in-memory dedup store");
                Self::in_memory()
            }
        }
    }

    async fn try_connect(url: &str) -> Result<ConnectionManager, redis::RedisError> {
        let client = redis::Client::open(url)?;
        let mut manager = ConnectionManager::new(client).await?;
        let () = redis::cmd("PING").query_async(&mut manager).await?;
        Ok(manager)
    }

    /// Look up a key. A missing key is `Ok(None)`, never an error.
    pub async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match &self.backend {
            Backend::Memory(map) => Ok(map.lock().await.get(key).cloned()),
            Backend::Redis(manager) => {
                let mut conn = manager.clone();
                conn.get(key).await.context(CommandSnafu)
            }
        }
    }

    /// Write a key with an optional expiry in seconds.
    ///
    /// The write is visible to a subsequent `get` in this process before
    /// this call returns.
    pub async fn set(&self, key: &str, value: &str, ttl: Option<u64>) -> Result<(), CacheError> {
        match &self.backend {
            Backend::Memory(map) => {
                // TTL is only enforced by the remote store
                map.lock().await.insert(key.to_string(), value.to_string());
                Ok(())
            }
            Backend::Redis(manager) => {
                let mut conn = manager.clone();
                match ttl {
                    Some(secs) => conn.set_ex(key, value, secs).await.context(CommandSnafu),
                    None => conn.set(key, value).await.context(CommandSnafu),
                }
            }
        }
    }

    /// Increment a counter key by `n`, returning the new value.
    pub async fn incr_by(&self, key: &str, n: i64) -> Result<i64, CacheError> {
        match &self.backend {
            Backend::Memory(map) => {
                let mut map = map.lock().await;
                let current = map
                    .get(key)
                    .and_then(|v| v.parse::<i64>().ok())
                    .unwrap_or(0);
                let next = current + n;
                map.insert(key.to_string(), next.to_string());
                Ok(next)
            }
            Backend::Redis(manager) => {
                let mut conn = manager.clone();
                conn.incr(key, n).await.context(CommandSnafu)
            }
        }
    }

    /// Remove every entry from the backing store.
    pub async fn clear(&self) -> Result<(), CacheError> {
        match &self.backend {
            Backend::Memory(map) => {
                map.lock().await.clear();
                Ok(())
            }
            Backend::Redis(manager) => {
                let mut conn = manager.clone();
                let () = redis::cmd("FLUSHDB")
                    .query_async(&mut conn)
                    .await
                    .context(CommandSnafu)?;
                Ok(())
            }
        }
    }
}
