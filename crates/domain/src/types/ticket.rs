//! Ticket progression models

use serde::{Deserialize, Serialize};

/// Optional resolution/comment body sent with a state transition.
///
/// Only non-empty fields are serialized; the backend rejects empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl TicketPayload {
    /// Drop empty-string fields so they are omitted from the wire body.
    #[must_use]
    pub fn cleaned(self) -> Self {
        Self {
            resolution: self.resolution.filter(|s| !s.is_empty()),
            comment: self.comment.filter(|s| !s.is_empty()),
        }
    }
}

/// A workflow state-transition request for a ticket entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketRequest {
    pub space_name: String,
    pub subpath: String,
    pub shortname: String,
    /// Named workflow action to apply (e.g. `resolve`, `close`).
    pub action: String,
    #[serde(default)]
    pub payload: TicketPayload,
}
