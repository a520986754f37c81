//! Client configuration

use std::time::Duration;

/// Configuration for the token store namespace and lifecycle.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Prefix applied to every key the store writes.
    pub key_prefix: String,
    /// Key (under the prefix) holding the auth token.
    pub auth_key: String,
    /// Default time-to-live for stored entries, in hours.
    pub ttl_hours: u64,
    /// Deploy-time cache-busting literal; changing it invalidates every
    /// previously stored entry, tokens included.
    pub reset_epoch: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_prefix: "dmart.client".to_string(),
            auth_key: "auth.token".to_string(),
            ttl_hours: 24,
            reset_epoch: "1".to_string(),
        }
    }
}

/// Configuration for the dmart client
#[derive(Debug, Clone)]
pub struct DmartConfig {
    /// Base URL of the backend (e.g. "http://localhost:8282").
    pub base_url: String,
    /// Headers attached to every request.
    pub default_headers: Vec<(String, String)>,
    /// Round-trip bound applied to query requests only.
    pub query_timeout: Duration,
    /// Token store settings.
    pub storage: StorageConfig,
}

impl Default for DmartConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8282".to_string(),
            default_headers: Vec::new(),
            query_timeout: Duration::from_millis(3000),
            storage: StorageConfig::default(),
        }
    }
}

impl DmartConfig {
    /// Config pointing at the given base URL, defaults elsewhere.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }
}
