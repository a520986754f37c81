//! # dmart domain types
//!
//! Pure data types shared across the dmart client SDK.
//!
//! This crate contains:
//! - Request/response models mirroring the backend's JSON contract
//! - The error taxonomy (`DmartError`, `ClientError`)
//! - Subpath normalization helpers and reserved path markers
//!
//! No I/O happens here; the HTTP-facing code lives in `dmart-client`.

pub mod errors;
pub mod paths;
pub mod types;

pub use errors::{ApiErrorBody, ClientError, DmartError, RequestInfo, Result};
pub use paths::{effective_subpath, normalize_subpath, MANAGEMENT_SPACE, ROOT_SUBPATH};
pub use types::*;
