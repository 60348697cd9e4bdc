//! Transport seam between the meeting client and the network.
//!
//! [`MeetingClient`](crate::MeetingClient) builds an [`ApiRequest`] for every
//! operation and hands it to a [`Transport`]. The transport only moves bytes:
//! it returns whatever status and body the server produced, and reserves
//! errors for requests that never got an answer.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::{Client, Method};
use tracing::{debug, trace};
use url::Url;

use crate::error::{ApiError, ApiResult};

/// A boxed future, keeping [`Transport`] object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// HTTP verbs used by the meeting API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Upper-case verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// A request relative to the API root.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Absolute path with percent-encoded segments, e.g. `/api/meeting/d%3Acam%3Ax`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Creates a request without query or body.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Shorthand for a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Shorthand for a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Shorthand for a PATCH request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// Shorthand for a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets a JSON body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Status and raw body of a server response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers [`ApiRequest`]s and returns the server's answer.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status. `Err` is reserved for requests that never got an
/// answer.
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, ApiResult<ApiResponse>>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, ApiResult<ApiResponse>> {
        (**self).send(request)
    }
}

/// Settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// API root, e.g. `https://cam.example.org/`.
    pub root: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
    /// Optional bearer token attached to every request.
    pub token: Option<String>,
}

impl HttpConfig {
    /// Creates a config with default timeout and user agent.
    pub fn new(root: Url) -> Self {
        Self {
            root,
            timeout: Duration::from_secs(30),
            user_agent: format!("huddle/{}", env!("CARGO_PKG_VERSION")),
            token: None,
        }
    }

    /// Builder: set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder: set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builder: set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    root: Url,
    token: Option<String>,
}

impl HttpTransport {
    /// Creates a transport for the given config.
    pub fn new(config: HttpConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            root: with_trailing_slash(config.root),
            token: config.token,
        })
    }

    /// Resolves a request path against the API root.
    fn resolve(&self, path: &str) -> ApiResult<Url> {
        self.root
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::invalid_argument(format!("invalid request path `{}`: {}", path, e)))
    }

    async fn execute(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = self.resolve(&request.path)?;
        debug!(method = request.method.as_str(), url = %url, "sending request");

        let mut builder = self.client.request(request.method.into(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Network("request timeout".to_string())
            } else if e.is_connect() {
                ApiError::Network(format!("connection failed: {}", e))
            } else {
                ApiError::Network(format!("request failed: {}", e))
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read response: {}", e)))?;
        trace!(status, bytes = body.len(), "received response");

        Ok(ApiResponse { status, body })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, ApiResult<ApiResponse>> {
        Box::pin(self.execute(request))
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builders() {
        let req = ApiRequest::get("/api/meeting/x")
            .with_query("start", "tok")
            .with_query("limit", "10");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.query.len(), 2);
        assert!(req.body.is_none());

        let req = ApiRequest::patch("/api/recording/r1").with_body(serde_json::json!({"publish": true}));
        assert_eq!(req.method.as_str(), "PATCH");
        assert!(req.body.is_some());
    }

    #[test]
    fn response_success_range() {
        assert!(ApiResponse::new(200, "").is_success());
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(302, "").is_success());
        assert!(!ApiResponse::new(404, "").is_success());
    }

    #[test]
    fn resolves_paths_under_root_prefix() {
        let root = Url::parse("https://cam.example.org/tenant").unwrap();
        let transport = HttpTransport::new(HttpConfig::new(root)).unwrap();
        let url = transport.resolve("/api/meeting/d%3Acam%3Ax").unwrap();
        assert_eq!(url.as_str(), "https://cam.example.org/tenant/api/meeting/d%3Acam%3Ax");
    }

    #[test]
    fn http_config_builders() {
        let root = Url::parse("https://cam.example.org/").unwrap();
        let config = HttpConfig::new(root)
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("tests")
            .with_token("secret");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "tests");
        assert_eq!(config.token.as_deref(), Some("secret"));
    }
}
