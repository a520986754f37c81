//! Batch mutation, submission and data-asset request models

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::types::query::ResourceType;

/// Mutation kinds accepted by the request endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    Create,
    Update,
    Replace,
    Delete,
    Move,
    UpdateAcl,
    Assign,
}

/// One record inside a batch mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    pub resource_type: ResourceType,
    pub shortname: String,
    pub subpath: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// Attachment payloads keyed by attachment kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<HashMap<String, Vec<Value>>>,
}

impl ActionRecord {
    pub fn new(
        resource_type: ResourceType,
        shortname: impl Into<String>,
        subpath: impl Into<String>,
    ) -> Self {
        Self {
            resource_type,
            shortname: shortname.into(),
            subpath: subpath.into(),
            uuid: None,
            attributes: Map::new(),
            attachments: None,
        }
    }

    /// Set one attribute on the record.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

/// Batch mutation envelope sent to the request endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    pub space_name: String,
    pub request_type: RequestType,
    pub records: Vec<ActionRecord>,
}

/// Flattened request for public workflow submission.
///
/// The URL is assembled as
/// `space/[resource_type/][workflow_shortname/]schema/subpath`; omitted
/// optional segments are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub space_name: String,
    pub schema_shortname: String,
    pub subpath: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_shortname: Option<String>,
    pub record: Value,
}

/// Request against a tabular data asset attached to an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataAssetRequest {
    pub space_name: String,
    pub subpath: String,
    pub shortname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    pub data_asset_type: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_data_assets: Option<Vec<String>>,
    /// SQL executed against the asset; defaults to `SELECT * FROM file`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string: Option<String>,
}
