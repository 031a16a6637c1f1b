//! Minimal HTTP transport with structured logging.
//!
//! - One shared `reqwest::Client` per [`HttpClient`], cloned cheaply for
//!   connection reuse across concurrent fetches
//! - Default headers and an optional timeout, fixed at build time
//! - No retries: every call is exactly one request
//! - Optional raw response logging via `SHARECOUNT_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), sharecount_http::HttpError> {
//! let client = sharecount_http::HttpClient::builder()
//!     .header("connection", "close")?
//!     .build()?;
//! let body = client.get_text("https://api.example.com/count?url=x").await?;
//! # Ok(()) }
//! ```
//!
//! Observability: `tracing` events are emitted for request start, response
//! status and timing, body snippets (trace level) and final errors. Every
//! request carries a `req_id` so concurrent fetches can be told apart.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::env;
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

const RAW_ENV: &str = "SHARECOUNT_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024;
const SNIPPET_LEN: usize = 500;

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned error {status}: {message}, request_id={request_id}")]
    Api {
        status: StatusCode,
        message: String,
        request_id: String,
    },
}

/// Anything that can perform a single GET and hand back the body as text.
///
/// [`HttpClient`] is the production implementation; tests plug in fakes to
/// count or refuse requests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_text(&self, url: &str) -> Result<String, HttpError>;
}

/// Collects default headers and timeout before building an [`HttpClient`].
///
/// ```
/// use sharecount_http::HttpClient;
/// use std::time::Duration;
///
/// let client = HttpClient::builder()
///     .timeout(Duration::from_secs(3))
///     .build()
///     .unwrap();
/// assert_eq!(client.timeout(), Some(Duration::from_secs(3)));
/// ```
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl HttpClientBuilder {
    /// Add a header sent with every request.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, HttpError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| HttpError::Build(format!("invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| HttpError::Build(format!("invalid value for header {name}: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn user_agent(self, agent: &str) -> Result<Self, HttpError> {
        self.header(USER_AGENT.as_str(), agent)
    }

    /// Per-request timeout. Without one, reqwest's defaults apply.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    pub fn build(self) -> Result<HttpClient, HttpError> {
        let mut builder = Client::builder().default_headers(self.headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(HttpClient {
            inner,
            timeout: self.timeout,
        })
    }
}

#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Client,
    timeout: Option<Duration>,
}

impl HttpClient {
    /// Client with no default headers and no timeout override.
    pub fn new() -> Result<Self, HttpError> {
        Self::builder().build()
    }

    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Issue one GET against an absolute URL and return the body.
    ///
    /// Non-2xx statuses become [`HttpError::Api`] carrying the best error
    /// message found in the body.
    pub async fn get_text(&self, url: &str) -> Result<String, HttpError> {
        let url = Url::parse(url).map_err(|e| HttpError::Url(e.to_string()))?;
        let req_id = Uuid::new_v4().simple().to_string();
        let host_path = format!("{}{}", url.host_str().unwrap_or("-"), url.path());

        tracing::debug!(
            req_id=%req_id,
            method="GET",
            host_path=%host_path,
            query=%url.query().unwrap_or(""),
            timeout_ms=?self.timeout.map(|t| t.as_millis() as u64),
            "http.request.start"
        );

        let t0 = Instant::now();
        let resp = self.inner.get(url).send().await.map_err(|err| {
            tracing::warn!(
                req_id=%req_id,
                host_path=%host_path,
                message=%err,
                "http.network_error.send"
            );
            HttpError::Network(err.to_string())
        })?;

        let status = resp.status();
        let request_id = resp
            .headers()
            .get("x-request-id")
            .or_else(|| resp.headers().get("x-correlation-id"))
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| req_id.clone());

        let body = resp.text().await.map_err(|err| {
            tracing::warn!(
                req_id=%req_id,
                %status,
                message=%err,
                "http.network_error.body"
            );
            HttpError::Network(err.to_string())
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        tracing::debug!(
            req_id=%req_id,
            %status,
            duration_ms=dur_ms,
            body_len=body.len(),
            "http.response"
        );

        if raw_enabled() {
            let (text, truncated) = match body.char_indices().nth(RAW_MAX_BODY) {
                Some((idx, _)) => (&body[..idx], true),
                None => (body.as_str(), false),
            };
            tracing::info!(target: "http.raw", %req_id, %status, body=%text, truncated);
        }

        let snippet = snip_body(&body);
        tracing::trace!(req_id=%req_id, body_snippet=%snippet, "http.response.body_snippet");

        if status.is_success() {
            return Ok(body);
        }

        let message = extract_error_message(&body);
        tracing::warn!(
            req_id=%req_id,
            %status,
            message=%message,
            x_request_id=%request_id,
            body_snippet=%snippet,
            "http.error"
        );
        Err(HttpError::Api {
            status,
            message,
            request_id,
        })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get_text(&self, url: &str) -> Result<String, HttpError> {
        HttpClient::get_text(self, url).await
    }
}

/// Pull a human message out of common JSON error shapes, falling back to a
/// snippet of the raw body.
fn extract_error_message(body: &str) -> String {
    // {"error":{"message":"..."}}
    #[derive(Deserialize)]
    struct ErrorEnv {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    // {"message":"..."}, {"detail":"..."}, {"error":"..."} or the legacy
    // Facebook {"error_code":1,"error_msg":"..."}
    #[derive(Deserialize)]
    struct Msg {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        error: String,
        #[serde(default)]
        error_msg: String,
    }

    if let Ok(env) = serde_json::from_str::<ErrorEnv>(body) {
        if !env.error.message.is_empty() {
            return env.error.message;
        }
    }
    if let Ok(m) = serde_json::from_str::<Msg>(body) {
        for msg in [m.message, m.detail, m.error, m.error_msg] {
            if !msg.is_empty() {
                return msg;
            }
        }
    }
    snip_body(body)
}

fn snip_body(body: &str) -> String {
    match body.char_indices().nth(SNIPPET_LEN) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/count"))
            .and(query_param("url", "http://a.com"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"count\": 3}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let body = client
            .get_text(&format!("{}/count?url=http%3A%2F%2Fa.com", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "{\"count\": 3}");
    }

    #[tokio::test]
    async fn sends_default_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("x-client", "sharecount"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::builder()
            .header("x-client", "sharecount")
            .unwrap()
            .build()
            .unwrap();
        let body = client.get_text(&server.uri()).await.unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(503).set_body_string("{\"message\": \"try later\"}"),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let err = client.get_text(&server.uri()).await.unwrap_err();
        match err {
            HttpError::Api {
                status, message, ..
            } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(message, "try later");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejects_relative_urls() {
        let client = HttpClient::new().unwrap();
        let err = client.get_text("/no/host").await.unwrap_err();
        assert!(matches!(err, HttpError::Url(_)));
    }

    #[test]
    fn rejects_bad_header_names() {
        let err = HttpClient::builder().header("bad header", "x").unwrap_err();
        assert!(matches!(err, HttpError::Build(_)));
    }

    #[test]
    fn error_message_prefers_json_fields() {
        assert_eq!(
            extract_error_message("{\"error\": {\"message\": \"nope\"}}"),
            "nope"
        );
        assert_eq!(extract_error_message("{\"error\": \"denied\"}"), "denied");
        assert_eq!(extract_error_message("<html>down</html>"), "<html>down</html>");
        assert_eq!(
            extract_error_message(r#"{"error_code": 1, "error_msg": "Unknown method"}"#),
            "Unknown method"
        );
    }

    #[test]
    fn escaped_quotes_in_messages_are_decoded() {
        assert_eq!(
            extract_error_message(r#"{"message": "say \"hi\" now"}"#),
            "say \"hi\" now"
        );
        assert_eq!(
            extract_error_message(r#"{"error": {"message": "bad \"url\" param"}}"#),
            "bad \"url\" param"
        );
    }

    #[test]
    fn snippets_are_truncated() {
        let long = "x".repeat(SNIPPET_LEN + 10);
        let snip = snip_body(&long);
        assert!(snip.ends_with("..."));
        assert_eq!(snip.len(), SNIPPET_LEN + 3);
    }
}
