//! Data-asset queries

use dmart_domain::{DataAssetRequest, Result};
use serde_json::Value;

use crate::endpoints::Endpoints;
use crate::http::Transport;

/// Default SQL applied when the caller supplies no query string.
const DEFAULT_QUERY_STRING: &str = "SELECT * FROM file";

/// Run a SQL-style query against a tabular data asset (CSV, parquet,
/// sqlite) attached to an entry.
pub async fn data_asset(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
    request: &DataAssetRequest,
) -> Result<Value> {
    let mut body = request.clone();
    if body.query_string.as_deref().map_or(true, str::is_empty) {
        body.query_string = Some(DEFAULT_QUERY_STRING.to_string());
    }
    let path = endpoints.data_asset.render(&[]);
    transport.post(&path, &body, token).await
}
