//! Shared test doubles and fixtures.

// Not every test binary exercises every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use ai_plugin::{HttpTransport, Result, TransportRequest, TransportResponse};

/// A routed fake transport: canned responses per URL, with a request log.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, CannedResponse>>,
    requests: Mutex<Vec<TransportRequest>>,
}

#[derive(Clone)]
struct CannedResponse {
    status: u16,
    body: String,
    final_url: Option<String>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with `status` for requests to `url`.
    pub fn route(&self, url: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().insert(
            url.to_string(),
            CannedResponse {
                status,
                body: body.to_string(),
                final_url: None,
            },
        );
    }

    /// Serve a response for `url` whose effective URL is `final_url`, as if
    /// the transport followed a redirect.
    pub fn route_redirected(&self, url: &str, final_url: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().insert(
            url.to_string(),
            CannedResponse {
                status,
                body: body.to_string(),
                final_url: Some(final_url.to_string()),
            },
        );
    }

    /// Number of requests issued to `url`.
    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.as_str() == url)
            .count()
    }

    /// All recorded requests, in order.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let canned = self
            .routes
            .lock()
            .unwrap()
            .get(request.url.as_str())
            .cloned();
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        let Some(canned) = canned else {
            panic!("no route configured for {url}");
        };
        let url = canned
            .final_url
            .map_or(url, |u| Url::parse(&u).expect("valid final URL"));
        Ok(TransportResponse {
            status: canned.status,
            url,
            body: canned.body,
        })
    }
}

/// Manifest JSON for a TODO plugin hosted on `host`, with the given auth
/// object.
pub fn manifest_json(host: &str, auth: serde_json::Value) -> String {
    serde_json::json!({
        "schema_version": "v1",
        "name_for_model": "todo",
        "name_for_human": "TODO Plugin",
        "description_for_model":
            "Plugin for managing a TODO list. You can add, remove and view your TODOs.",
        "description_for_human":
            "Plugin for managing a TODO list. You can add, remove and view your TODOs.",
        "auth": auth,
        "api": {
            "type": "openapi",
            "url": format!("https://{host}/openapi.yaml"),
            "is_user_authenticated": false
        },
        "logo_url": format!("https://{host}/logo.png"),
        "contact_email": format!("support@{host}"),
        "legal_info_url": format!("https://{host}/legal")
    })
    .to_string()
}

/// A v3.0 OpenAPI document (JSON) serving `/todos` with GET and POST from
/// `base_url`.
pub fn openapi_v3_json(base_url: &str) -> String {
    serde_json::json!({
        "openapi": "3.0.1",
        "info": {"title": "TODO API", "version": "1.0.0"},
        "servers": [{"url": base_url}],
        "paths": {
            "/todos": {
                "get": {"operationId": "getTodos"},
                "post": {"operationId": "addTodo"}
            }
        }
    })
    .to_string()
}
