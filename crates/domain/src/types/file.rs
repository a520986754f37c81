//! File upload and payload fetch models

use serde::{Deserialize, Serialize};

use crate::types::query::ResourceType;

/// Addressing information for an uploaded or fetched payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRequest {
    pub space_name: String,
    pub subpath: String,
    pub shortname: String,
    pub resource_type: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_shortname: Option<String>,
    /// File extension including the leading dot (e.g. `.json`, `.png`),
    /// used when fetching a payload directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
}

/// An in-memory file to upload as an entry payload.
#[derive(Debug, Clone)]
pub struct FilePayload {
    /// File name sent in the multipart part (e.g. `photo.png`).
    pub file_name: String,
    pub content: Vec<u8>,
    /// MIME type of the content; used to infer the payload content type
    /// when the caller does not name one.
    pub mime_type: Option<String>,
}

impl FilePayload {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), content, mime_type: None }
    }

    #[must_use]
    pub fn mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }
}
