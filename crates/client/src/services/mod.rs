//! Per-endpoint service functions
//!
//! Each module maps one endpoint family onto the transport: it shapes the
//! request (URL templating, defaults, body construction) and decodes the
//! typed response. Services hold no state; the transport and token are
//! passed in by the facade.

pub mod asset;
pub mod auth;
pub mod entry;
pub mod file;
pub mod info;
pub mod query;
pub mod request;
pub mod ticket;
