//! Payload upload and fetch operations

use dmart_domain::{
    ApiResponse, ContentType, DmartError, FilePayload, FileRequest, Payload, Record,
    RecordAttributes, Result, Scope,
};
use futures::future::join_all;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::warn;

use crate::endpoints::Endpoints;
use crate::http::Transport;

/// Upload one file as the payload of an entry.
///
/// The multipart form carries three fields: `space_name`, `request_record`
/// (a JSON record with `is_active=true` and the payload descriptor), and
/// `payload_file` (the raw bytes). The payload content type is inferred
/// from the file's MIME type when the request does not name a schema for it.
pub async fn upload_with_payload(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
    file_request: &FileRequest,
    file: &FilePayload,
    scope: Scope,
) -> Result<ApiResponse> {
    let payload = Payload {
        content_type: file.mime_type.as_deref().and_then(ContentType::from_mime),
        schema_shortname: file_request.schema_shortname.clone(),
        body: Value::Object(serde_json::Map::new()),
        ..Payload::default()
    };
    let record: Record = Record {
        resource_type: file_request.resource_type,
        shortname: file_request.shortname.clone(),
        subpath: file_request.subpath.clone(),
        uuid: None,
        attributes: RecordAttributes {
            is_active: Some(true),
            payload: Some(payload),
            ..RecordAttributes::default()
        },
        attachments: None,
    };
    let record_json = serde_json::to_vec(&record)
        .map_err(|err| DmartError::Serialization(format!("failed to encode record: {err}")))?;

    let record_part = Part::bytes(record_json)
        .mime_str("application/json")
        .map_err(|err| DmartError::Serialization(err.to_string()))?;
    let mut file_part = Part::bytes(file.content.clone()).file_name(file.file_name.clone());
    if let Some(mime) = &file.mime_type {
        file_part = file_part
            .mime_str(mime)
            .map_err(|err| DmartError::Serialization(format!("invalid mime type {mime}: {err}")))?;
    }

    let form = Form::new()
        .text("space_name", file_request.space_name.clone())
        .part("request_record", record_part)
        .part("payload_file", file_part);

    let path = endpoints.resource_with_payload.render(&[("scope", scope.as_str())]);
    transport.post_multipart(&path, form, token).await
}

/// Upload several files against the same addressing record.
///
/// All uploads are dispatched together and allowed to settle; the first
/// failure in file order is then surfaced. Uploads already in flight when
/// one fails are not cancelled.
pub async fn upload_multiple(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
    file_request: &FileRequest,
    files: &[FilePayload],
    scope: Scope,
) -> Result<()> {
    let uploads = files
        .iter()
        .map(|file| upload_with_payload(transport, endpoints, token, file_request, file, scope));
    let outcomes = join_all(uploads).await;

    let failed = outcomes.iter().filter(|o| o.is_err()).count();
    if failed > 0 {
        warn!(total = files.len(), failed, "some uploads failed");
    }
    for outcome in outcomes {
        outcome?;
    }
    Ok(())
}

/// Rendered path of an entry's payload file,
/// `/{scope}/payload/{resource}/{space}/{subpath}/{shortname}[.{schema}]{ext}`.
fn payload_path(endpoints: &Endpoints, file_request: &FileRequest, scope: Scope) -> String {
    let schema = file_request
        .schema_shortname
        .as_deref()
        .map(|s| format!(".{s}"))
        .unwrap_or_default();
    let ext = file_request.ext.as_deref().unwrap_or_default();
    let filename = format!("{}{schema}{ext}", file_request.shortname);
    endpoints.payload.render(&[
        ("scope", scope.as_str()),
        ("resource", file_request.resource_type.as_str()),
        ("space", &file_request.space_name),
        ("subpath", &file_request.subpath),
        ("filename", &filename),
    ])
}

/// Absolute URL of an entry's payload file, for direct download or embedding.
pub fn file_url(
    transport: &Transport,
    endpoints: &Endpoints,
    file_request: &FileRequest,
    scope: Scope,
) -> String {
    transport.url(&payload_path(endpoints, file_request, scope))
}

/// Fetch an entry's payload file directly. The body is returned as decoded
/// JSON; non-JSON payloads should be fetched via [`file_url`] instead.
pub async fn get_file(
    transport: &Transport,
    endpoints: &Endpoints,
    token: Option<&str>,
    file_request: &FileRequest,
    scope: Scope,
) -> Result<Value> {
    let path = payload_path(endpoints, file_request, scope);
    transport.get(&path, token).await
}

#[cfg(test)]
mod tests {
    use dmart_domain::ResourceType;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::DmartConfig;

    fn setup(uri: &str) -> (Transport, Endpoints) {
        let transport = Transport::new(&DmartConfig::with_base_url(uri)).expect("transport");
        (transport, Endpoints::default())
    }

    fn media_request() -> FileRequest {
        FileRequest {
            space_name: "demo".into(),
            subpath: "posts".into(),
            shortname: "p1".into(),
            resource_type: ResourceType::Media,
            schema_shortname: None,
            ext: None,
        }
    }

    #[tokio::test]
    async fn upload_sends_multipart_record_and_file() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/managed/resource_with_payload"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "success", "records": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (transport, endpoints) = setup(&server.uri());
        let file = FilePayload::new("photo.png", vec![0x89, 0x50, 0x4e, 0x47])
            .mime_type("image/png");
        let response = upload_with_payload(
            &transport,
            &endpoints,
            Some("jwt"),
            &media_request(),
            &file,
            Scope::Managed,
        )
        .await
        .expect("upload");
        assert!(response.is_success());

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"space_name\""));
        assert!(body.contains("name=\"request_record\""));
        assert!(body.contains("name=\"payload_file\""));
        assert!(body.contains("\"is_active\":true"));
        assert!(body.contains("\"content_type\":\"image\""));
    }

    #[tokio::test]
    async fn upload_multiple_surfaces_first_failure() {
        let server = MockServer::start().await;
        // The second file is larger than the backend accepts.
        Mock::given(method("POST"))
            .and(path("/managed/resource_with_payload"))
            .respond_with(ResponseTemplate::new(413).set_body_json(json!({
                "status": "failed",
                "error": {"type": "request", "code": 100, "message": "payload too large", "info": []}
            })))
            .mount(&server)
            .await;

        let (transport, endpoints) = setup(&server.uri());
        let files = vec![
            FilePayload::new("a.png", vec![1]),
            FilePayload::new("b.png", vec![2; 64]),
            FilePayload::new("c.png", vec![3]),
        ];
        let err = upload_multiple(
            &transport,
            &endpoints,
            Some("jwt"),
            &media_request(),
            &files,
            Scope::Managed,
        )
        .await
        .unwrap_err();
        let client_err = err.client_error().expect("api error");
        assert_eq!(client_err.status, Some(413));
        assert_eq!(client_err.message, "payload too large");

        // Every upload was dispatched despite the failures.
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);
    }

    #[test]
    fn file_url_includes_schema_and_extension() {
        let (transport, endpoints) = setup("http://localhost:8282");
        let mut request = media_request();
        request.schema_shortname = Some("blog".into());
        request.ext = Some(".json".into());
        let url = file_url(&transport, &endpoints, &request, Scope::Public);
        assert_eq!(
            url,
            "http://localhost:8282/public/payload/media/demo/posts/p1.blog.json"
        );
    }

    #[test]
    fn file_url_omits_absent_schema() {
        let (transport, endpoints) = setup("http://localhost:8282");
        let mut request = media_request();
        request.ext = Some(".png".into());
        let url = file_url(&transport, &endpoints, &request, Scope::Managed);
        assert_eq!(url, "http://localhost:8282/managed/payload/media/demo/posts/p1.png");
    }

    #[tokio::test]
    async fn get_file_fetches_json_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/managed/payload/content/demo/posts/p1.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "hello"})))
            .mount(&server)
            .await;

        let (transport, endpoints) = setup(&server.uri());
        let mut request = media_request();
        request.resource_type = ResourceType::Content;
        request.ext = Some(".json".into());
        let body = get_file(&transport, &endpoints, Some("jwt"), &request, Scope::Managed)
            .await
            .expect("payload");
        assert_eq!(body["title"], "hello");
    }
}
