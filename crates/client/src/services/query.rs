//! Query and CSV export operations

use std::time::Duration;

use dmart_domain::{normalize_subpath, QueryRequest, QueryResponse, QueryType, Result, Scope, SortType};

use crate::endpoints::Endpoints;
use crate::http::Transport;

/// Sort field applied when a query leaves `sort_by` unset.
const DEFAULT_SORT_BY: &str = "created_at";

/// Apply the request shaping shared by query and CSV export: collapse the
/// subpath and fill the sort defaults for every type except `spaces`.
fn prepare(query: &QueryRequest) -> QueryRequest {
    let mut prepared = query.clone();
    prepared.subpath = normalize_subpath(&prepared.subpath);
    if prepared.query_type != QueryType::Spaces {
        prepared.sort_type = Some(prepared.sort_type.unwrap_or(SortType::Ascending));
        prepared.sort_by =
            Some(prepared.sort_by.take().unwrap_or_else(|| DEFAULT_SORT_BY.to_string()));
    }
    prepared
}

/// Run a search/listing query, bounded by the configured round-trip timeout.
pub async fn query(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
    request: &QueryRequest,
    scope: Scope,
    timeout: Duration,
) -> Result<QueryResponse> {
    let prepared = prepare(request);
    let path = endpoints.query.render(&[("scope", scope.as_str())]);
    transport.post_with_timeout(&path, &prepared, token, timeout).await
}

/// Export query results as CSV. Same shaping as `query`, no timeout bound.
pub async fn csv(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
    request: &QueryRequest,
) -> Result<QueryResponse> {
    let prepared = prepare(request);
    let path = endpoints.csv.render(&[]);
    transport.post(&path, &prepared, token).await
}
