//! Batch mutation, public submission and space management

use dmart_domain::{ActionRequest, ApiResponse, Result, SubmitRequest};

use crate::endpoints::Endpoints;
use crate::http::Transport;

/// Send a batch mutation (create/update/replace/delete/move/...) against
/// managed resources.
pub async fn request(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
    action: &ActionRequest,
) -> Result<ApiResponse> {
    let path = endpoints.request.render(&[]);
    transport.post(&path, action, token).await
}

/// Submit a record through a public workflow.
///
/// The URL path is assembled in order as
/// `space/[resource_type/][workflow_shortname/]schema/subpath`; optional
/// segments that are absent are skipped, never left blank.
pub async fn submit(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
    submission: &SubmitRequest,
) -> Result<ApiResponse> {
    let mut segments: Vec<&str> = Vec::with_capacity(4);
    let resource_type = submission.resource_type.map(|r| r.as_str());
    if let Some(resource_type) = resource_type {
        segments.push(resource_type);
    }
    if let Some(workflow) = submission.workflow_shortname.as_deref() {
        segments.push(workflow);
    }
    segments.push(&submission.schema_shortname);
    segments.push(&submission.subpath);
    let tail = segments.join("/");

    let path = endpoints.submit.render(&[("space", &submission.space_name), ("path", &tail)]);
    transport.post(&path, &submission.record, token).await
}

/// Run a space-management mutation (create/update/delete a space).
pub async fn space(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
    action: &ActionRequest,
) -> Result<ApiResponse> {
    let path = endpoints.space.render(&[]);
    transport.post(&path, action, token).await
}
