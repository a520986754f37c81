//! Query requests and the enumerations shared across the API surface

use serde::{Deserialize, Serialize};

/// Access-level partition of the API surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Authenticated surface.
    #[default]
    Managed,
    /// Unauthenticated surface.
    Public,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Managed => "managed",
            Self::Public => "public",
        }
    }
}

/// Kind of search/listing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    Aggregation,
    Search,
    Subpath,
    Events,
    History,
    Tags,
    Spaces,
    Counters,
    Reports,
    Attachments,
    AttachmentsAggregation,
}

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortType {
    Ascending,
    Descending,
}

/// Resource kinds known to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    User,
    Group,
    Folder,
    Schema,
    Content,
    Acl,
    Comment,
    Reaction,
    Media,
    Locator,
    Relationship,
    Alteration,
    History,
    Space,
    Branch,
    Permission,
    Role,
    Ticket,
    Json,
    Post,
    PluginWrapper,
    Notification,
    Jsonl,
    Csv,
    Sqlite,
    Parquet,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
            Self::Folder => "folder",
            Self::Schema => "schema",
            Self::Content => "content",
            Self::Acl => "acl",
            Self::Comment => "comment",
            Self::Reaction => "reaction",
            Self::Media => "media",
            Self::Locator => "locator",
            Self::Relationship => "relationship",
            Self::Alteration => "alteration",
            Self::History => "history",
            Self::Space => "space",
            Self::Branch => "branch",
            Self::Permission => "permission",
            Self::Role => "role",
            Self::Ticket => "ticket",
            Self::Json => "json",
            Self::Post => "post",
            Self::PluginWrapper => "plugin_wrapper",
            Self::Notification => "notification",
            Self::Jsonl => "jsonl",
            Self::Csv => "csv",
            Self::Sqlite => "sqlite",
            Self::Parquet => "parquet",
        }
    }
}

/// Payload content kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Text,
    Html,
    Markdown,
    Json,
    Image,
    Python,
    Pdf,
    Audio,
    Video,
    Jsonl,
    Csv,
    Sqlite,
    Parquet,
}

impl ContentType {
    /// Infer a payload content type from a MIME type string.
    ///
    /// Used by uploads when the caller does not name the content type
    /// explicitly; unknown MIME types yield `None` and the field is left for
    /// the backend to infer.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim();
        if mime.starts_with("image/") {
            return Some(Self::Image);
        }
        if mime.starts_with("audio/") {
            return Some(Self::Audio);
        }
        if mime.starts_with("video/") {
            return Some(Self::Video);
        }
        match mime {
            "application/pdf" => Some(Self::Pdf),
            "application/json" => Some(Self::Json),
            "text/html" => Some(Self::Html),
            "text/markdown" => Some(Self::Markdown),
            "text/csv" => Some(Self::Csv),
            m if m.starts_with("text/") => Some(Self::Text),
            _ => None,
        }
    }
}

/// Reducer applied to an aggregation group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationReducer {
    pub name: String,
    pub alias: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Reducers are either structured or bare function names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reducers {
    Structured(Vec<AggregationReducer>),
    Names(Vec<String>),
}

/// Aggregation description attached to `QueryType::Aggregation` queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationData {
    #[serde(default)]
    pub load: Vec<String>,
    #[serde(default)]
    pub group_by: Vec<String>,
    pub reducers: Reducers,
}

/// A search/listing request.
///
/// `sort_by`/`sort_type` are left unset here; the query operation fills the
/// backend defaults (`created_at`, ascending) for every type except
/// [`QueryType::Spaces`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(rename = "type")]
    pub query_type: QueryType,
    pub space_name: String,
    pub subpath: String,
    #[serde(default)]
    pub search: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_types: Option<Vec<ResourceType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_schema_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_shortnames: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_type: Option<SortType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieve_json_payload: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieve_attachments: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate_schema: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jq_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_subpath: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_data: Option<AggregationData>,
}

impl QueryRequest {
    /// A query with the mandatory fields set and every filter left off.
    pub fn new(
        query_type: QueryType,
        space_name: impl Into<String>,
        subpath: impl Into<String>,
    ) -> Self {
        Self {
            query_type,
            space_name: space_name.into(),
            subpath: subpath.into(),
            search: String::new(),
            filter_types: None,
            filter_schema_names: None,
            filter_shortnames: None,
            from_date: None,
            to_date: None,
            sort_by: None,
            sort_type: None,
            retrieve_json_payload: None,
            retrieve_attachments: None,
            validate_schema: None,
            jq_filter: None,
            exact_subpath: None,
            limit: None,
            offset: None,
            aggregation_data: None,
        }
    }
}
