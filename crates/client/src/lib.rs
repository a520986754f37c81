//! # dmart client
//!
//! Async client SDK for the dmart content management backend.
//!
//! This crate contains:
//! - [`DmartClient`] — facade exposing one method per backend endpoint
//! - [`Transport`](http::Transport) — request dispatcher over `reqwest`
//! - [`TokenStore`](storage::TokenStore) — expiring token persistence with a
//!   pluggable backend
//! - Typed endpoint templates and query-string serialization
//!
//! ## Architecture
//! - Request/response models live in `dmart-domain`
//! - Each endpoint family is a service module of pure mappings over the
//!   transport; the facade owns the transport and the token lifecycle
//!
//! ```no_run
//! # async fn run() -> dmart_domain::Result<()> {
//! use dmart_client::{DmartClient, DmartConfig};
//!
//! let client = DmartClient::new(DmartConfig::default())?;
//! client.login("alice", "secret").await?;
//! let profile = client.get_profile().await?;
//! # let _ = profile;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod http;
pub mod params;
pub mod services;
pub mod storage;
pub mod time;

pub use client::DmartClient;
pub use config::{DmartConfig, StorageConfig};
pub use http::Transport;
pub use storage::{MemoryBackend, NoopBackend, StorageBackend, TokenStore};

// Re-export the domain crate so callers need a single dependency.
pub use dmart_domain as domain;
