//! Entry retrieval operations

use dmart_domain::{effective_subpath, EntryQuery, ResourceType, ResponseEntry, Result, Scope};

use crate::endpoints::Endpoints;
use crate::http::Transport;
use crate::params::{to_query_string, ParamValue};

/// Fetch a single entry.
///
/// An empty or `/` subpath maps to the reserved root marker. Retrieval
/// flags follow the common query-string rules, so flags left `false` are
/// omitted; `validate_schema` defaults to `true`.
pub async fn retrieve_entry(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
    query: &EntryQuery,
    scope: Scope,
) -> Result<ResponseEntry> {
    let resource_type = query.resource_type.unwrap_or(ResourceType::Content);
    let subpath = effective_subpath(&query.subpath);
    let path = endpoints.entry.render(&[
        ("scope", scope.as_str()),
        ("resource", resource_type.as_str()),
        ("space", &query.space_name),
        ("subpath", &subpath),
        ("shortname", &query.shortname),
    ]);

    let params = to_query_string(
        &[
            (
                "retrieve_json_payload",
                Some(ParamValue::Bool(query.retrieve_json_payload.unwrap_or(false))),
            ),
            (
                "retrieve_attachments",
                Some(ParamValue::Bool(query.retrieve_attachments.unwrap_or(false))),
            ),
            ("validate_schema", Some(ParamValue::Bool(query.validate_schema.unwrap_or(true)))),
        ],
        true,
    );

    let url = if params.is_empty() { path } else { format!("{path}?{params}") };
    transport.get(&url, token).await
}

/// Check whether a user property value is already taken,
/// e.g. `check_existing("email", "a@b.c")`.
pub async fn check_existing(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
    prop: &str,
    value: &str,
) -> Result<ResponseEntry> {
    let path = endpoints.check_existing.render(&[]);
    let params = to_query_string(&[(prop, Some(ParamValue::Str(value.to_string())))], true);
    transport.get(&format!("{path}?{params}"), token).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::DmartConfig;

    fn setup(uri: &str) -> (Transport, Endpoints) {
        let transport = Transport::new(&DmartConfig::with_base_url(uri)).expect("transport");
        (transport, Endpoints::default())
    }

    #[tokio::test]
    async fn empty_subpath_maps_to_root_marker() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/managed/entry/content/demo/__root__/welcome"))
            .and(query_param("validate_schema", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "shortname": "welcome",
                "subpath": "__root__"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (transport, endpoints) = setup(&server.uri());
        let query = EntryQuery::new("demo", "/", "welcome");
        let entry = retrieve_entry(&transport, &endpoints, Some("jwt"), &query, Scope::Managed)
            .await
            .expect("entry");
        assert_eq!(entry.shortname, "welcome");
    }

    #[tokio::test]
    async fn false_flags_are_omitted_from_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/public/entry/ticket/demo/tickets/t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"shortname": "t1"})))
            .mount(&server)
            .await;

        let (transport, endpoints) = setup(&server.uri());
        let query = EntryQuery::new("demo", "tickets", "t1")
            .resource_type(ResourceType::Ticket)
            .retrieve_json_payload(true);
        retrieve_entry(&transport, &endpoints, None, &query, Scope::Public).await.expect("entry");

        let requests = server.received_requests().await.unwrap();
        let raw_query = requests[0].url.query().unwrap_or("");
        assert!(raw_query.contains("retrieve_json_payload=true"));
        assert!(!raw_query.contains("retrieve_attachments"));
        assert!(raw_query.contains("validate_schema=true"));
    }

    #[tokio::test]
    async fn explicit_validate_schema_false_is_omitted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"shortname": "p1"})))
            .mount(&server)
            .await;

        let (transport, endpoints) = setup(&server.uri());
        let query = EntryQuery::new("demo", "posts", "p1").validate_schema(false);
        retrieve_entry(&transport, &endpoints, None, &query, Scope::Managed).await.expect("entry");

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].url.query().is_none());
    }

    #[tokio::test]
    async fn check_existing_builds_property_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/check-existing"))
            .and(query_param("email", "a@b.c"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let (transport, endpoints) = setup(&server.uri());
        check_existing(&transport, &endpoints, None, "email", "a@b.c").await.expect("response");
    }
}
