//! API invocation engine.
//!
//! Given a resolved OpenAPI spec, translates an abstract
//! endpoint/method/parameters request into a wire-correct, authenticated
//! HTTP call: existence check against the spec, version-dependent base URL,
//! query-string encoding for GET versus JSON body for mutating methods.
//! Responses are returned untouched; status interpretation belongs to the
//! caller.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::{self, TokenProvider};
use crate::manifest::ManifestAuth;
use crate::openapi::OpenApiSpec;
use crate::transport::{HttpMethod, HttpTransport, TransportRequest, TransportResponse};
use crate::{Error, Result};

/// Invokes endpoints of an API described by an OpenAPI spec.
pub struct OpenApiProvider {
    spec: OpenApiSpec,
    transport: Arc<dyn HttpTransport>,
    auth: ManifestAuth,
    service_name: String,
}

impl OpenApiProvider {
    /// Create a provider over a resolved spec. `service_name` selects the
    /// verification token for `service_http` auth.
    pub fn new(
        spec: OpenApiSpec,
        transport: Arc<dyn HttpTransport>,
        auth: ManifestAuth,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            spec,
            transport,
            auth,
            service_name: service_name.into(),
        }
    }

    /// Call `endpoint` with `method`, carrying `parameters` in the query
    /// string (GET) or as a JSON body (POST/PUT/PATCH/DELETE).
    ///
    /// # Errors
    ///
    /// - [`Error::PluginApi`] when the spec does not declare the
    ///   endpoint/method, declares no usable base URL, or is of an
    ///   unsupported OpenAPI version.
    /// - Auth errors from [`auth::auth_headers`].
    pub async fn interact(
        &self,
        endpoint: &str,
        method: HttpMethod,
        parameters: &Value,
        tokens: &dyn TokenProvider,
    ) -> Result<TransportResponse> {
        self.ensure_endpoint(endpoint, method)?;

        let mut url = self.resolve_base_url()?;
        url.set_path(endpoint);

        let mut request = TransportRequest::new(url, method);
        match method {
            HttpMethod::Get => encode_query(&mut request.url, parameters)?,
            HttpMethod::Head | HttpMethod::Options => {}
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch | HttpMethod::Delete => {
                request
                    .headers
                    .insert("Content-Type".to_string(), "application/json".to_string());
                request.body = Some(serde_json::to_string(parameters)?);
            }
        }

        let headers = auth::auth_headers(&self.auth, tokens, &self.service_name).await?;
        request.headers.extend(headers);

        debug!(method = %method, url = %request.url, "invoking plugin endpoint");
        self.transport.execute(request).await
    }

    fn ensure_endpoint(&self, endpoint: &str, method: HttpMethod) -> Result<()> {
        if self.spec.paths.is_empty() {
            return Err(Error::PluginApi(
                "plugin does not specify any OpenAPI paths".to_string(),
            ));
        }
        let item = self.spec.paths.get(endpoint).ok_or_else(|| {
            Error::PluginApi(format!("plugin does not specify OpenAPI path \"{endpoint}\""))
        })?;
        if item.operation(method).is_none() {
            return Err(Error::PluginApi(format!(
                "plugin does not specify {method} method for path {endpoint}"
            )));
        }
        Ok(())
    }

    /// Base URL resolution branches on the spec's literal version string:
    /// v2 documents declare a bare `host`, v3.x documents declare `servers`.
    fn resolve_base_url(&self) -> Result<Url> {
        let version = self.spec.version.as_str();
        let base = if version.starts_with('2') {
            self.spec.host.clone().map(|host| {
                // v2 `host` is scheme-less on the wire
                if host.contains("://") {
                    host
                } else {
                    format!("https://{host}")
                }
            })
        } else if version.starts_with("3.0") || version.starts_with("3.1") {
            self.spec.servers.first().map(|server| server.url.clone())
        } else {
            return Err(Error::PluginApi(format!(
                "unsupported OpenAPI version \"{version}\""
            )));
        };

        let base = base.ok_or_else(|| {
            Error::PluginApi("OpenAPI document does not declare a usable base URL".to_string())
        })?;
        Url::parse(&base)
            .map_err(|e| Error::PluginApi(format!("OpenAPI base URL is invalid: {e}")))
    }
}

/// Encode GET parameters (a JSON object, or null for none) into the query
/// string. String values are appended verbatim; other values use their
/// JSON rendering.
fn encode_query(url: &mut Url, parameters: &Value) -> Result<()> {
    match parameters {
        Value::Null => Ok(()),
        Value::Object(map) => {
            if map.is_empty() {
                return Ok(());
            }
            let mut pairs = url.query_pairs_mut();
            for (name, value) in map {
                match value {
                    Value::String(s) => pairs.append_pair(name, s),
                    other => pairs.append_pair(name, &other.to_string()),
                };
            }
            Ok(())
        }
        _ => Err(Error::PluginApi(
            "GET parameters must be a JSON object".to_string(),
        )),
    }
}
