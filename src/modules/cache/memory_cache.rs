//! In-process TTL cache
//!
//! Mirrors the usual Redis-style surface (`set`/`get`/`del`/`exists`/
//! `expire`/`ttl`/`flushall`) on top of a `HashMap` guarded by a Tokio
//! `RwLock`. Values are stored as JSON so callers can cache any
//! serializable read model.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::core::config::CacheConfig;
use crate::core::error::{AppError, Result};

/// Key namespaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePrefix {
    Article,
    User,
    Category,
    Tag,
    Comment,
}

impl CachePrefix {
    /// Parse a bare namespace name such as `category`
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "article" => Some(CachePrefix::Article),
            "user" => Some(CachePrefix::User),
            "category" => Some(CachePrefix::Category),
            "tag" => Some(CachePrefix::Tag),
            "comment" => Some(CachePrefix::Comment),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CachePrefix::Article => "article:",
            CachePrefix::User => "user:",
            CachePrefix::Category => "category:",
            CachePrefix::Tag => "tag:",
            CachePrefix::Comment => "comment:",
        }
    }
}

impl fmt::Display for CachePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call options for [`CacheService::set`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheOptions {
    /// Falls back to the configured default TTL
    pub ttl: Option<Duration>,
    pub prefix: Option<CachePrefix>,
}

struct CacheEntry {
    value: serde_json::Value,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

pub struct CacheService {
    entries: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

impl fmt::Debug for CacheService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheService")
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

fn cache_key(key: &str, prefix: Option<CachePrefix>) -> String {
    match prefix {
        Some(prefix) => format!("{}{}", prefix, key),
        None => key.to_string(),
    }
}

impl CacheService {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl: config.default_ttl,
        }
    }

    /// Store `value` under `key`, replacing any previous entry
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, options: CacheOptions) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| AppError::Internal(format!("Failed to set cache: {}", e)))?;
        let ttl = options.ttl.unwrap_or(self.default_ttl);

        self.entries.write().await.insert(
            cache_key(key, options.prefix),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    /// Fetch a live entry. Missing, expired and undecodable entries all read as `None`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, prefix: Option<CachePrefix>) -> Option<T> {
        let cache_key = cache_key(key, prefix);
        let value = {
            let entries = self.entries.read().await;
            let entry = entries.get(&cache_key)?;
            if !entry.is_live(Instant::now()) {
                return None;
            }
            entry.value.clone()
        };

        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!("Cache entry {} has unexpected shape: {}", cache_key, e);
                None
            }
        }
    }

    pub async fn delete(&self, key: &str, prefix: Option<CachePrefix>) {
        self.entries.write().await.remove(&cache_key(key, prefix));
    }

    pub async fn exists(&self, key: &str, prefix: Option<CachePrefix>) -> bool {
        self.entries
            .read()
            .await
            .get(&cache_key(key, prefix))
            .is_some_and(|entry| entry.is_live(Instant::now()))
    }

    /// Reset the expiry of a live entry. Returns false when there is none.
    pub async fn expire(&self, key: &str, ttl: Duration, prefix: Option<CachePrefix>) -> bool {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        match entries.get_mut(&cache_key(key, prefix)) {
            Some(entry) if entry.is_live(now) => {
                entry.expires_at = now + ttl;
                true
            }
            _ => false,
        }
    }

    /// Remaining lifetime in whole seconds, or -2 when the key is absent
    pub async fn ttl(&self, key: &str, prefix: Option<CachePrefix>) -> i64 {
        let now = Instant::now();
        match self.entries.read().await.get(&cache_key(key, prefix)) {
            Some(entry) if entry.is_live(now) => {
                (entry.expires_at - now).as_secs() as i64
            }
            _ => -2,
        }
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Drop expired entries, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }
}
