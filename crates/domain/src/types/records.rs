//! Response envelope and record models
//!
//! Every JSON endpoint answers with the same envelope:
//! `{status, error?, records: [...]}`; query endpoints add
//! `attributes: {total, returned}`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::ApiErrorBody;
use crate::types::query::{ContentType, ResourceType};

/// Outcome marker carried in every response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Failed,
}

/// Localized display string (Arabic, English, Kurdish).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kd: Option<String>,
}

/// Schema-validation outcome recorded on a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Valid,
    Invalid,
}

/// Content body and metadata attached to an entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_shortname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(default)]
    pub body: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_validated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_status: Option<ValidationStatus>,
}

/// Common entry attributes carried inside a record.
///
/// Unknown attributes are preserved in `extra` so callers keep access to
/// resource-specific fields without the SDK modeling every resource type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayname: Option<Translation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Translation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_shortname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One record in a response envelope, generic over its attribute shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: DeserializeOwned"))]
pub struct Record<A = RecordAttributes> {
    pub resource_type: ResourceType,
    pub shortname: String,
    pub subpath: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    pub attributes: A,
    /// Secondary records grouped by attachment kind (media, json, comment...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<HashMap<String, Vec<Record<RecordAttributes>>>>,
}

/// Response envelope shared by all JSON endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: DeserializeOwned"))]
pub struct ApiResponse<A = RecordAttributes> {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
    #[serde(default = "Vec::new")]
    pub records: Vec<Record<A>>,
}

impl<A> ApiResponse<A> {
    /// Whether the backend reported success.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Result counters attached to query responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub returned: u64,
    /// Endpoint-specific extras, e.g. `folders_report` on health checks.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Envelope returned by query endpoints: records plus result counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
    #[serde(default = "Vec::new")]
    pub records: Vec<Record>,
    #[serde(default)]
    pub attributes: QueryCounts,
}

impl QueryResponse {
    /// Whether the backend reported success.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_roundtrip_with_unknown_attributes() {
        let raw = serde_json::json!({
            "status": "success",
            "records": [{
                "resource_type": "content",
                "shortname": "post1",
                "subpath": "posts",
                "attributes": {
                    "is_active": true,
                    "displayname": {"en": "First post"},
                    "custom_field": 42
                }
            }]
        });
        let resp: ApiResponse = serde_json::from_value(raw).unwrap();
        assert!(resp.is_success());
        let attrs = &resp.records[0].attributes;
        assert_eq!(attrs.is_active, Some(true));
        assert_eq!(attrs.extra.get("custom_field"), Some(&Value::from(42)));
    }

    #[test]
    fn failed_envelope_carries_error_body() {
        let raw = serde_json::json!({
            "status": "failed",
            "error": {"type": "db", "code": 230, "message": "not found", "info": []},
            "records": []
        });
        let resp: ApiResponse = serde_json::from_value(raw).unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.error.unwrap().code, 230);
    }

    #[test]
    fn query_counts_preserve_folders_report() {
        let raw = serde_json::json!({
            "status": "success",
            "records": [],
            "attributes": {"total": 3, "returned": 3, "folders_report": {"posts": {}}}
        });
        let resp: QueryResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(resp.attributes.total, 3);
        assert!(resp.attributes.extra.contains_key("folders_report"));
    }
}
