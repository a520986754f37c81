//! Entry retrieval models

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::types::query::ResourceType;
use crate::types::records::{Payload, Record, RecordAttributes, Translation};

/// Parameters for fetching one entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryQuery {
    /// Defaults to [`ResourceType::Content`] when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    pub space_name: String,
    pub subpath: String,
    pub shortname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieve_json_payload: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieve_attachments: Option<bool>,
    /// Defaults to `true`; the backend validates unless told otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate_schema: Option<bool>,
}

impl EntryQuery {
    pub fn new(
        space_name: impl Into<String>,
        subpath: impl Into<String>,
        shortname: impl Into<String>,
    ) -> Self {
        Self {
            resource_type: None,
            space_name: space_name.into(),
            subpath: subpath.into(),
            shortname: shortname.into(),
            retrieve_json_payload: None,
            retrieve_attachments: None,
            validate_schema: None,
        }
    }

    #[must_use]
    pub fn resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = Some(resource_type);
        self
    }

    #[must_use]
    pub fn retrieve_json_payload(mut self, retrieve: bool) -> Self {
        self.retrieve_json_payload = Some(retrieve);
        self
    }

    #[must_use]
    pub fn retrieve_attachments(mut self, retrieve: bool) -> Self {
        self.retrieve_attachments = Some(retrieve);
        self
    }

    #[must_use]
    pub fn validate_schema(mut self, validate: bool) -> Self {
        self.validate_schema = Some(validate);
        self
    }
}

/// A single entry, returned flattened (no envelope) by the entry endpoint.
///
/// Workflow fields are present only on ticket entries, and the user-specific
/// fields only when the entry is a user record; everything else ends up in
/// `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    #[serde(default)]
    pub shortname: String,
    #[serde(default)]
    pub subpath: String,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<HashMap<String, Vec<Record<RecordAttributes>>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Value>,

    // Workflow fields, set on ticket entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_shortname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,

    // User fields, set on user entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msisdn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_email_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_msisdn_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_password_change: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_entry_exposes_workflow_fields() {
        let raw = serde_json::json!({
            "shortname": "ticket_1",
            "subpath": "tickets",
            "is_active": true,
            "workflow_shortname": "support",
            "state": "pending",
            "is_open": true
        });
        let entry: ResponseEntry = serde_json::from_value(raw).unwrap();
        assert_eq!(entry.workflow_shortname.as_deref(), Some("support"));
        assert_eq!(entry.is_open, Some(true));
    }

    #[test]
    fn builder_sets_retrieval_flags() {
        let q = EntryQuery::new("demo", "posts", "p1")
            .resource_type(ResourceType::Content)
            .retrieve_json_payload(true)
            .validate_schema(false);
        assert_eq!(q.retrieve_json_payload, Some(true));
        assert_eq!(q.validate_schema, Some(false));
        assert!(q.retrieve_attachments.is_none());
    }
}
