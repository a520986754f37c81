//! Authentication and profile models

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::records::{ApiResponse, Translation};

/// Client kind reported by the backend for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Web,
    Mobile,
    Bot,
}

/// User interface languages known to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Arabic,
    /// The backend spells this `engligh` on the wire.
    #[serde(rename = "engligh")]
    English,
    Kurdish,
    French,
    Turkish,
}

/// Actions a permission can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Query,
    View,
    Update,
    Create,
    Delete,
    Attach,
    Move,
    ProgressTicket,
}

/// One permission entry in a user profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Permission {
    #[serde(default)]
    pub allowed_actions: Vec<ActionType>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub restricted_fields: Vec<Value>,
    #[serde(default)]
    pub allowed_fields_values: Map<String, Value>,
}

/// Attributes of the record returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginAttributes {
    pub access_token: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayname: Option<Translation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Attributes of the profile record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msisdn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayname: Option<Translation>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_email_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_msisdn_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_password_change: Option<bool>,
    #[serde(default)]
    pub permissions: HashMap<String, Permission>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Envelope returned by the login endpoint.
pub type LoginResponse = ApiResponse<LoginAttributes>;

/// Envelope returned by the profile endpoint.
pub type ProfileResponse = ApiResponse<ProfileAttributes>;

/// The bearer token from the first record of a login response, if any.
pub fn access_token(response: &LoginResponse) -> Option<&str> {
    response.records.first().map(|record| record.attributes.access_token.as_str())
}
