//! Expiring key-value store for session tokens
//!
//! Namespaced key-value persistence with per-entry expiry and an epoch-based
//! reset: when the configured reset epoch changes between deployments, every
//! entry under the namespace is wiped on construction, invalidating any
//! previously cached token.
//!
//! The backing store is pluggable. [`MemoryBackend`] is the default;
//! [`NoopBackend`] serves headless contexts where nothing should persist —
//! the client works against either without branching.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::StorageConfig;
use crate::time::{Clock, SystemClock};

/// Key (under the namespace prefix) holding the reset-epoch marker.
const RESET_MARKER_KEY: &str = "reset";

const MILLIS_PER_HOUR: u64 = 3_600_000;

/// Raw string persistence the token store writes through.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
    /// All keys currently present, in no particular order.
    fn keys(&self) -> Vec<String>;
}

/// In-process backend; entries live as long as the client instance.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.lock().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }
}

/// Backend for headless contexts: reads always miss, writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBackend;

impl StorageBackend for NoopBackend {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: String) {}

    fn remove(&self, _key: &str) {}

    fn keys(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<T: StorageBackend + ?Sized> StorageBackend for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

/// One stored record: the value plus its write time and time-to-live.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    value: String,
    /// Write time, milliseconds since the UNIX epoch.
    timestamp: u64,
    /// Time-to-live in hours.
    ttl_hours: u64,
}

/// Namespaced key-value store with per-entry expiry.
pub struct TokenStore<C: Clock = SystemClock> {
    backend: Box<dyn StorageBackend>,
    prefix: String,
    default_ttl_hours: u64,
    clock: C,
}

impl TokenStore<SystemClock> {
    /// Create a store over the given backend, applying the reset epoch.
    pub fn new(backend: Box<dyn StorageBackend>, config: &StorageConfig) -> Self {
        Self::with_clock(backend, config, SystemClock)
    }
}

impl<C: Clock> TokenStore<C> {
    /// Create a store with an explicit clock (for deterministic tests).
    pub fn with_clock(backend: Box<dyn StorageBackend>, config: &StorageConfig, clock: C) -> Self {
        let store = Self {
            backend,
            prefix: config.key_prefix.clone(),
            default_ttl_hours: config.ttl_hours,
            clock,
        };
        store.apply_reset_epoch(&config.reset_epoch);
        store
    }

    fn scoped_key(&self, key: &str) -> String {
        format!("{}.{}", self.prefix, key)
    }

    /// Wipe all namespaced entries when the stored epoch marker does not
    /// match the configured literal, then record the current literal.
    fn apply_reset_epoch(&self, epoch: &str) {
        let marker_key = self.scoped_key(RESET_MARKER_KEY);
        let stored = self.backend.get(&marker_key);
        if stored.as_deref() != Some(epoch) {
            debug!(epoch, "storage reset epoch changed, clearing namespace");
            self.clear();
            self.backend.set(&marker_key, epoch.to_string());
        }
    }

    /// Store `value` under `key` with the default time-to-live.
    pub fn set_item(&self, key: &str, value: &str) {
        self.set_item_with_ttl(key, value, self.default_ttl_hours);
    }

    /// Store `value` under `key`, expiring after `ttl_hours`.
    pub fn set_item_with_ttl(&self, key: &str, value: &str, ttl_hours: u64) {
        let entry = StoredEntry {
            value: value.to_string(),
            timestamp: self.clock.millis_since_epoch(),
            ttl_hours,
        };
        match serde_json::to_string(&entry) {
            Ok(raw) => self.backend.set(&self.scoped_key(key), raw),
            Err(err) => warn!(key, error = %err, "failed to serialize storage entry"),
        }
    }

    /// Read the value under `key`; expired or unreadable records are removed
    /// and reported as absent.
    pub fn get_item(&self, key: &str) -> Option<String> {
        let scoped = self.scoped_key(key);
        let raw = self.backend.get(&scoped)?;
        let entry: StoredEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(key, error = %err, "removing unreadable storage entry");
                self.backend.remove(&scoped);
                return None;
            }
        };

        let age_ms = self.clock.millis_since_epoch().saturating_sub(entry.timestamp);
        if age_ms > entry.ttl_hours * MILLIS_PER_HOUR {
            debug!(key, "storage entry expired");
            self.backend.remove(&scoped);
            return None;
        }
        Some(entry.value)
    }

    /// Remove the entry under `key`, if any.
    pub fn remove_item(&self, key: &str) {
        self.backend.remove(&self.scoped_key(key));
    }

    /// Remove every key under the namespace prefix.
    pub fn clear(&self) {
        let prefix = format!("{}.", self.prefix);
        for key in self.backend.keys() {
            if key.starts_with(&prefix) {
                self.backend.remove(&key);
            }
        }
    }
}
