use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};
use wadash_domain::constants::API_KEY_HEADER;
use wadash_domain::{ApiConfig, DashError, Result};

use super::query::{build_url, QueryParams};
use super::retry::{retry_with_backoff, RetryPolicy};
use crate::errors::InfraError;

fn api_key_header() -> HeaderName {
    HeaderName::from_static(API_KEY_HEADER)
}

/// Per-call options for [`HttpClient::request`].
///
/// `retries` and `timeout` fall back to the client configuration when unset.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub query: QueryParams,
    pub headers: HeaderMap,
    pub retries: Option<u32>,
    pub timeout: Option<Duration>,
    authenticated: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            query: Vec::new(),
            headers: HeaderMap::new(),
            retries: None,
            timeout: None,
            authenticated: true,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self { method: Method::POST, ..Self::default() }
    }

    pub fn delete() -> Self {
        Self { method: Method::DELETE, ..Self::default() }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.query.push((key.into(), value));
        self
    }

    pub fn queries<K: Into<String>>(
        mut self,
        entries: impl IntoIterator<Item = (K, Option<String>)>,
    ) -> Self {
        self.query.extend(entries.into_iter().map(|(key, value)| (key.into(), value)));
        self
    }

    /// Adds a header. The API key header is always replaced by the client.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sends the request without the API key (liveness probe only).
    pub(crate) fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

/// A successful (2xx) response with its body fully read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Deserializes the body; an empty body reads as JSON `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let empty = self.body.iter().all(u8::is_ascii_whitespace);
        let parsed = if empty {
            serde_json::from_value(Value::Null)
        } else {
            serde_json::from_slice(&self.body)
        };
        parsed.map_err(|e| InfraError::from(e).into())
    }
}

/// HTTP client for the admin API with API key, timeout and retry handling.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    config: Arc<ApiConfig>,
    api_key: HeaderValue,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient").field("config", &self.config).finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder(config: ApiConfig) -> HttpClientBuilder {
        HttpClientBuilder::new(config)
    }

    /// Convenience constructor with the default builder settings.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Performs a request with retries and returns the successful response.
    ///
    /// Non-2xx responses, transport failures and per-attempt timeouts are all
    /// retried; after the last attempt the last failure is returned.
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<RawResponse> {
        let url = build_url(self.config.normalized_base_url(), path, &options.query)?;
        let headers = self.headers_for(&options);
        let timeout = options.timeout.unwrap_or_else(|| self.config.timeout());
        let policy = RetryPolicy::new(
            options.retries.unwrap_or(self.config.retries),
            self.config.backoff_unit(),
        );
        let body = match &options.body {
            Some(value) => Some(serde_json::to_vec(value).map_err(InfraError::from)?),
            None => None,
        };

        retry_with_backoff(policy, |attempt| {
            let mut builder =
                self.client.request(options.method.clone(), url.clone()).headers(headers.clone());
            if let Some(bytes) = &body {
                builder = builder.body(bytes.clone());
            }
            debug!(attempt, path, "Sending HTTP request");
            self.attempt(builder, timeout)
        })
        .await
    }

    /// [`request`](Self::request) followed by JSON deserialization.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        self.request(path, options).await?.json()
    }

    /// [`request`](Self::request) for binary payloads; no JSON parsing.
    pub async fn request_bytes(&self, path: &str, options: RequestOptions) -> Result<Vec<u8>> {
        Ok(self.request(path, options).await?.body)
    }

    async fn attempt(&self, builder: RequestBuilder, timeout: Duration) -> Result<RawResponse> {
        let exchange = async {
            let response = builder.send().await.map_err(InfraError::from)?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await.map_err(InfraError::from)?;
            Ok::<_, DashError>((status, headers, body.to_vec()))
        };

        // Dropping the exchange future on expiry aborts the request.
        let (status, headers, body) = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| DashError::Timeout { timeout_ms: timeout.as_millis() as u64 })??;

        debug!(status = status.as_u16(), bytes = body.len(), "Received HTTP response");

        if !status.is_success() {
            return Err(DashError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        Ok(RawResponse { status: status.as_u16(), headers, body })
    }

    fn headers_for(&self, options: &RequestOptions) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &options.headers {
            headers.insert(name.clone(), value.clone());
        }

        let key_header = api_key_header();
        headers.remove(&key_header);
        if options.authenticated {
            headers.insert(key_header, self.api_key.clone());
        }
        headers
    }
}

/// User-facing message for a non-2xx response.
///
/// Prefers `detail`, then `message`, from a JSON body. A body that is not JSON
/// yields the status reason phrase.
pub(crate) fn error_message(status: StatusCode, body: &[u8]) -> String {
    let fallback = || format!("API error {}", status.as_u16());

    match serde_json::from_slice::<Value>(body) {
        Ok(json) => ["detail", "message"]
            .iter()
            .find_map(|field| json.get(field).and_then(message_text))
            .unwrap_or_else(fallback),
        Err(_) => status.canonical_reason().map(str::to_string).unwrap_or_else(fallback),
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    config: ApiConfig,
    user_agent: Option<String>,
    connect_timeout: Option<Duration>,
}

impl HttpClientBuilder {
    fn new(config: ApiConfig) -> Self {
        Self { config, user_agent: None, connect_timeout: None }
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut api_key = HeaderValue::from_str(&self.config.api_key).map_err(|_| {
            DashError::Config("API key contains characters not allowed in a header".into())
        })?;
        api_key.set_sensitive(true);

        let mut builder = ReqwestClient::builder();
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let client = builder.build().map_err(InfraError::from)?;

        Ok(HttpClient { client, config: Arc::new(self.config), api_key })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config(server: &MockServer, retries: u32) -> ApiConfig {
        ApiConfig {
            base_url: server.uri(),
            api_key: "test-key".into(),
            timeout_ms: 500,
            retries,
            backoff_unit_ms: 10,
        }
    }

    #[test]
    fn error_message_prefers_detail() {
        let body = br#"{"detail":"Group not found","message":"ignored"}"#;
        assert_eq!(error_message(StatusCode::NOT_FOUND, body), "Group not found");
    }

    #[test]
    fn error_message_falls_back_to_message_then_status() {
        assert_eq!(error_message(StatusCode::BAD_REQUEST, br#"{"message":"bad"}"#), "bad");
        assert_eq!(error_message(StatusCode::BAD_REQUEST, br#"{"detail":""}"#), "API error 400");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, b"<html>oops</html>"), "Bad Gateway");

        let unnamed = StatusCode::from_u16(599).unwrap();
        assert_eq!(error_message(unnamed, b""), "API error 599");
    }

    #[test]
    fn validation_detail_is_stringified() {
        let body = br#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#;
        assert!(error_message(StatusCode::UNPROCESSABLE_ENTITY, body).contains("field required"));
    }

    #[test]
    fn empty_body_reads_as_null() {
        let response = RawResponse { status: 204, headers: HeaderMap::new(), body: Vec::new() };
        assert_eq!(response.json::<Option<Value>>().unwrap(), None);
    }

    #[test]
    fn api_key_must_be_header_safe() {
        let config = ApiConfig { api_key: "bad\nkey".into(), ..ApiConfig::default() };
        assert!(matches!(HttpClient::new(config), Err(DashError::Config(_))));
    }

    #[tokio::test]
    async fn sends_api_key_and_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/session"))
            .and(header(API_KEY_HEADER, "test-key"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "WORKING"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(config(&server, 0)).unwrap();
        let body: Value = client.request_json("/api/session", RequestOptions::get()).await.unwrap();
        assert_eq!(body["status"], "WORKING");
    }

    #[tokio::test]
    async fn caller_cannot_override_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header(API_KEY_HEADER, "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(config(&server, 0)).unwrap();
        let options = RequestOptions::get()
            .header(api_key_header(), HeaderValue::from_static("forged"))
            .header(HeaderName::from_static("x-trace"), HeaderValue::from_static("1"));
        client.request("/api/stats", options).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let sent: Vec<_> = requests[0].headers.get_all(API_KEY_HEADER).iter().collect();
        assert_eq!(sent, vec!["test-key"]);
        assert_eq!(requests[0].headers.get("x-trace").unwrap(), "1");
    }

    #[tokio::test]
    async fn unauthenticated_request_omits_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&server)
            .await;

        let client = HttpClient::new(config(&server, 0)).unwrap();
        client.request("/health", RequestOptions::get().unauthenticated()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get(API_KEY_HEADER).is_none());
    }

    #[tokio::test]
    async fn retries_server_errors_until_success() {
        let server = MockServer::start().await;
        let attempts = std::sync::Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();
        Mock::given(method("GET"))
            .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
                let current = attempts_clone.fetch_add(1, Ordering::SeqCst);
                if current < 2 {
                    ResponseTemplate::new(500).set_body_json(json!({"detail": "busy"}))
                } else {
                    ResponseTemplate::new(200).set_body_json(json!({"ok": true}))
                }
            })
            .expect(3)
            .mount(&server)
            .await;

        let client = HttpClient::new(config(&server, 2)).unwrap();
        let body: Value = client.request_json("/api/stats", RequestOptions::get()).await.unwrap();
        assert_eq!(body["ok"], true);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn client_errors_are_retried_and_last_error_returned() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Group not found"})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = HttpClient::new(config(&server, 1)).unwrap();
        let err = client.request("/filter/groups/x", RequestOptions::delete()).await.unwrap_err();
        assert_eq!(err, DashError::Api { status: 404, message: "Group not found".into() });
    }

    #[tokio::test]
    async fn slow_response_counts_as_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(300)),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = HttpClient::new(config(&server, 1)).unwrap();
        let options = RequestOptions::get().timeout(Duration::from_millis(50));
        let err = client.request("/api/stats", options).await.unwrap_err();
        assert_eq!(err, DashError::Timeout { timeout_ms: 50 });
    }

    #[tokio::test]
    async fn per_call_retries_override_config() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(config(&server, 3)).unwrap();
        let err = client.request("/api/stats", RequestOptions::get().retries(0)).await.unwrap_err();
        assert_eq!(err, DashError::Api { status: 503, message: "Service Unavailable".into() });
    }

    #[tokio::test]
    async fn body_of_wrong_shape_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": "many"})))
            .expect(1)
            .mount(&server)
            .await;

        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Totals {
            total: u64,
        }

        let client = HttpClient::new(config(&server, 2)).unwrap();
        let err =
            client.request_json::<Totals>("/api/stats", RequestOptions::get()).await.unwrap_err();
        assert!(matches!(err, DashError::Parse(_)));
    }
}
