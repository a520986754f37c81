//! Error types used throughout the client SDK

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Structured error body the backend embeds in its response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub info: Value,
}

/// Method and URL of the request that produced an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestInfo {
    pub method: String,
    pub url: String,
}

/// Normalized error surfaced by every client operation.
///
/// Transport failures carry a `code` and no `response`; backend application
/// errors (HTTP 4xx/5xx with an envelope) carry `status` and the backend's
/// structured `response` body.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ClientError {
    /// Transport-level error code (e.g. `timeout`, `connect`, `decode`).
    pub code: Option<String>,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
    pub message: String,
    /// The originating request, when known.
    pub request: Option<RequestInfo>,
    /// The backend's structured error body, when present.
    pub response: Option<ApiErrorBody>,
}

impl ClientError {
    /// Transport-level failure: no HTTP response was received.
    pub fn transport(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            status: None,
            message: message.into(),
            request: None,
            response: None,
        }
    }

    /// Backend application failure: a non-2xx response, optionally with the
    /// backend's error envelope.
    pub fn status(status: u16, message: impl Into<String>, body: Option<ApiErrorBody>) -> Self {
        Self { code: None, status: Some(status), message: message.into(), request: None, response: body }
    }

    /// Attach the originating request's method and URL.
    #[must_use]
    pub fn with_request(mut self, method: impl Into<String>, url: impl Into<String>) -> Self {
        self.request = Some(RequestInfo { method: method.into(), url: url.into() });
        self
    }
}

/// Main error type for the dmart client
#[derive(Debug, Error)]
pub enum DmartError {
    /// Local precondition failure, raised before any network call.
    #[error("configuration error: {0}")]
    Config(String),

    /// Request or response body could not be (de)serialized locally.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Normalized transport or backend failure.
    #[error(transparent)]
    Api(#[from] ClientError),
}

impl DmartError {
    /// The normalized error record, when this is an API failure.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias for dmart client operations
pub type Result<T> = std::result::Result<T, DmartError>;
