//! Injected HTTP transport.
//!
//! All outbound requests go through the [`HttpTransport`] trait so the
//! discovery, OAuth, and invocation layers stay independent of the HTTP
//! stack. [`ReqwestTransport`] is the production implementation; tests
//! inject fakes. Cancellation and timeout policy, if any, belong to the
//! transport implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::Result;

/// HTTP method of an outbound request. Closed set; the invocation engine
/// matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET — parameters travel in the query string
    Get,
    /// POST — parameters travel as a JSON body
    Post,
    /// PUT — parameters travel as a JSON body
    Put,
    /// PATCH — parameters travel as a JSON body
    Patch,
    /// DELETE — parameters travel as a JSON body
    Delete,
    /// HEAD — no parameters
    Head,
    /// OPTIONS — no parameters
    Options,
}

impl HttpMethod {
    /// Uppercase wire name of the method.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// An outbound HTTP request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Target URL, including any query string
    pub url: Url,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body, if any
    pub body: Option<String>,
}

impl TransportRequest {
    /// Create a request with no headers or body.
    #[must_use]
    pub fn new(url: Url, method: HttpMethod) -> Self {
        Self {
            url,
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Create a bare GET request.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new(url, HttpMethod::Get)
    }
}

/// The response observed after the transport followed any redirects.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Effective URL the response was served from (post-redirect)
    pub url: Url,
    /// Raw response body
    pub body: String,
}

impl TransportResponse {
    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Raw response body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.body
    }
}

/// Capability to issue HTTP requests. Implementations follow redirects and
/// report the effective URL on the response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute a request and return the response, whatever its status.
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// Production transport backed by [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport over an existing client (shared pools, custom
    /// timeouts).
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.clone());

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let url = response.url().clone();
        let body = response.text().await?;

        Ok(TransportResponse { status, url, body })
    }
}
