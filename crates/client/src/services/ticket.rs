//! Ticket workflow progression

use dmart_domain::{ApiResponse, Result, TicketRequest};

use crate::endpoints::Endpoints;
use crate::http::Transport;

/// Apply a workflow action to a ticket. Empty resolution/comment strings
/// are dropped from the body before the call.
pub async fn progress_ticket(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
    ticket: &TicketRequest,
) -> Result<ApiResponse> {
    let path = endpoints.progress_ticket.render(&[
        ("space", &ticket.space_name),
        ("subpath", &ticket.subpath),
        ("shortname", &ticket.shortname),
        ("action", &ticket.action),
    ]);
    let body = ticket.payload.clone().cleaned();
    transport.put(&path, &body, token).await
}

#[cfg(test)]
mod tests {
    use dmart_domain::TicketPayload;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::DmartConfig;

    fn setup(uri: &str) -> (Transport, Endpoints) {
        let transport = Transport::new(&DmartConfig::with_base_url(uri)).expect("transport");
        (transport, Endpoints::default())
    }

    #[tokio::test]
    async fn puts_action_with_cleaned_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/managed/progress-ticket/demo/tickets/t1/resolve"))
            .and(body_json(json!({"resolution": "fixed"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "success", "records": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (transport, endpoints) = setup(&server.uri());
        let ticket = TicketRequest {
            space_name: "demo".into(),
            subpath: "tickets".into(),
            shortname: "t1".into(),
            action: "resolve".into(),
            payload: TicketPayload {
                resolution: Some("fixed".into()),
                comment: Some(String::new()),
            },
        };
        let response =
            progress_ticket(&transport, &endpoints, Some("jwt"), &ticket).await.expect("progress");
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn empty_payload_sends_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/managed/progress-ticket/demo/tickets/t2/close"))
            .and(body_json(json!({})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "success", "records": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (transport, endpoints) = setup(&server.uri());
        let ticket = TicketRequest {
            space_name: "demo".into(),
            subpath: "tickets".into(),
            shortname: "t2".into(),
            action: "close".into(),
            payload: TicketPayload::default(),
        };
        progress_ticket(&transport, &endpoints, Some("jwt"), &ticket).await.expect("progress");
    }
}
