//! Deployment info and health endpoints

use dmart_domain::{QueryResponse, Result};
use serde_json::Value;

use crate::endpoints::Endpoints;
use crate::http::Transport;

/// Run the backend health check for one space. The response reuses the
/// query envelope with a per-folder report in its extra attributes.
pub async fn get_space_health(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
    space_name: &str,
) -> Result<QueryResponse> {
    let path = endpoints.health.render(&[("space", space_name)]);
    transport.get(&path, token).await
}

/// Fetch the deployment manifest (version, build info).
pub async fn get_manifest(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
) -> Result<Value> {
    let path = endpoints.manifest.render(&[]);
    transport.get(&path, token).await
}

/// Fetch the public deployment settings.
pub async fn get_settings(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
) -> Result<Value> {
    let path = endpoints.settings.render(&[]);
    transport.get(&path, token).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::DmartConfig;

    fn setup(uri: &str) -> (Transport, Endpoints) {
        let transport = Transport::new(&DmartConfig::with_base_url(uri)).expect("transport");
        (transport, Endpoints::default())
    }

    #[tokio::test]
    async fn health_check_carries_folder_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/managed/health/demo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "records": [],
                "attributes": {"total": 0, "returned": 0, "folders_report": {"posts": {"valid_entries": 4}}}
            })))
            .mount(&server)
            .await;

        let (transport, endpoints) = setup(&server.uri());
        let response =
            get_space_health(&transport, &endpoints, Some("jwt"), "demo").await.expect("health");
        assert!(response.attributes.extra.contains_key("folders_report"));
    }

    #[tokio::test]
    async fn manifest_and_settings_pass_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/info/manifest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "1.4.9"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/info/settings"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"languages": ["en", "ar"]})),
            )
            .mount(&server)
            .await;

        let (transport, endpoints) = setup(&server.uri());
        let manifest = get_manifest(&transport, &endpoints, None).await.expect("manifest");
        assert_eq!(manifest["version"], "1.4.9");
        let settings = get_settings(&transport, &endpoints, None).await.expect("settings");
        assert_eq!(settings["languages"][0], "en");
    }
}
