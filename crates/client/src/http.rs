//! Request dispatcher
//!
//! Wraps `reqwest` behind a small surface the service modules share:
//! attaches the bearer token when one is supplied (the login call passes
//! none), defaults to JSON bodies, and normalizes every failure — transport
//! errors, timeouts, and non-2xx responses with or without a backend error
//! envelope — into the [`ClientError`] shape. No retries: every request is
//! sent exactly once.

use std::time::Duration;

use dmart_domain::{ApiErrorBody, ClientError, DmartError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::DmartConfig;

/// HTTP dispatcher owned by one client instance.
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    base_url: String,
}

impl Transport {
    /// Build the underlying HTTP client from configuration.
    ///
    /// Fails fast on an invalid base URL or malformed default header,
    /// before any network call.
    pub fn new(config: &DmartConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|err| DmartError::Config(format!("invalid base url: {err}")))?;

        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| DmartError::Config(format!("invalid header name {name}: {err}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|err| DmartError::Config(format!("invalid header value: {err}")))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| DmartError::Config(format!("failed to build http client: {err}")))?;

        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    /// Absolute URL for a rendered path (and optional query string).
    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    /// Execute a GET request and decode the JSON response.
    pub async fn get<R: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<R> {
        let builder = self.builder(Method::GET, path, token);
        self.send(builder, None).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<B, R>(&self, path: &str, body: &B, token: Option<&str>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let builder = self.builder(Method::POST, path, token).json(body);
        self.send(builder, None).await
    }

    /// Execute a POST request with a JSON body and a round-trip bound.
    pub async fn post_with_timeout<B, R>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
        timeout: Duration,
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let builder = self.builder(Method::POST, path, token).json(body);
        self.send(builder, Some(timeout)).await
    }

    /// Execute a PUT request with a JSON body.
    pub async fn put<B, R>(&self, path: &str, body: &B, token: Option<&str>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let builder = self.builder(Method::PUT, path, token).json(body);
        self.send(builder, None).await
    }

    /// Execute a multipart POST; the form sets its own content type.
    pub async fn post_multipart<R: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        token: Option<&str>,
    ) -> Result<R> {
        let builder = self.builder(Method::POST, path, token).multipart(form);
        self.send(builder, None).await
    }

    fn builder(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder
    }

    async fn send<R: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        timeout: Option<Duration>,
    ) -> Result<R> {
        let request = builder
            .build()
            .map_err(|err| DmartError::Serialization(format!("failed to build request: {err}")))?;
        let method = request.method().to_string();
        let url = request.url().to_string();
        debug!(%method, %url, "dispatching request");

        let pending = self.client.execute(request);
        let outcome = match timeout {
            Some(limit) => match tokio::time::timeout(limit, pending).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    return Err(ClientError::transport(
                        "timeout",
                        format!("request exceeded {} ms", limit.as_millis()),
                    )
                    .with_request(&method, &url)
                    .into());
                }
            },
            None => pending.await,
        };

        let response = outcome.map_err(|err| {
            DmartError::from(
                ClientError::transport(transport_code(&err), err.to_string())
                    .with_request(&method, &url),
            )
        })?;

        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "received response");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, &text).with_request(&method, &url).into());
        }

        response.json::<R>().await.map_err(|err| {
            DmartError::from(
                ClientError::transport("decode", format!("failed to parse response: {err}"))
                    .with_request(&method, &url),
            )
        })
    }
}

/// Classify a reqwest failure into a stable transport code.
fn transport_code(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_decode() {
        "decode"
    } else if err.is_request() {
        "request"
    } else {
        "transport"
    }
}

/// Envelope wrapper used only to pull the backend error body out of a
/// non-2xx response.
#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

fn status_error(status: StatusCode, body_text: &str) -> ClientError {
    let body = serde_json::from_str::<ErrorEnvelope>(body_text).ok().and_then(|e| e.error);
    let message = body
        .as_ref()
        .map(|b| b.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("server returned status {}", status.as_u16()));
    ClientError::status(status.as_u16(), message, body)
}
