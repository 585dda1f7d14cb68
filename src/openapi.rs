//! OpenAPI document resolution.
//!
//! Fetches a plugin's OpenAPI document (JSON or YAML), applies the
//! cross-domain redirect policy, and normalizes the handful of fields the
//! invocation engine needs: the literal version string, the
//! version-specific base-URL material, and which methods exist at which
//! paths. Operation bodies are kept opaque.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::domain;
use crate::transport::{HttpMethod, HttpTransport, TransportRequest};
use crate::{Error, Result};

/// A normalized, read-only OpenAPI document.
#[derive(Debug, Clone)]
pub struct OpenApiSpec {
    /// Literal version string (`"2.0"`, `"3.0.x"`, `"3.1.x"`); empty when
    /// the document declares neither `swagger` nor `openapi`
    pub version: String,
    /// v2 base host (scheme-less on the wire)
    pub host: Option<String>,
    /// v3.x server entries
    pub servers: Vec<Server>,
    /// Declared paths and their operations
    pub paths: BTreeMap<String, PathItem>,
}

/// A v3.x `servers` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    /// Base URL of the server
    pub url: String,
}

/// Operations declared at a single path. Operation bodies are opaque; the
/// invocation engine only needs existence-of-method-at-path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    get: Option<serde_json::Value>,
    #[serde(default)]
    post: Option<serde_json::Value>,
    #[serde(default)]
    put: Option<serde_json::Value>,
    #[serde(default)]
    patch: Option<serde_json::Value>,
    #[serde(default)]
    delete: Option<serde_json::Value>,
    #[serde(default)]
    head: Option<serde_json::Value>,
    #[serde(default)]
    options: Option<serde_json::Value>,
}

impl PathItem {
    /// The opaque operation declared for a method, if any.
    #[must_use]
    pub fn operation(&self, method: HttpMethod) -> Option<&serde_json::Value> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    swagger: Option<String>,
    #[serde(default)]
    openapi: Option<String>,
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    servers: Vec<Server>,
    #[serde(default)]
    paths: BTreeMap<String, PathItem>,
}

impl OpenApiSpec {
    /// Parse a raw OpenAPI document (JSON or YAML) into a normalized spec,
    /// stamping the literal version string for downstream branching.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestValidation`] when the body parses as
    /// neither a JSON nor a YAML OpenAPI document.
    pub fn parse(body: &str) -> Result<Self> {
        let raw: RawDocument = if body.trim_start().starts_with('{') {
            serde_json::from_str(body)
                .map_err(|e| Error::validation_with("invalid OpenAPI JSON document", e))?
        } else {
            serde_yaml::from_str(body)
                .map_err(|e| Error::validation_with("invalid OpenAPI YAML document", e))?
        };

        let version = raw.openapi.or(raw.swagger).unwrap_or_default();
        Ok(Self {
            version,
            host: raw.host,
            servers: raw.servers,
            paths: raw.paths,
        })
    }
}

/// Fetches and parses OpenAPI documents, enforcing the same redirect
/// policy as manifest discovery.
pub struct SpecExplorer {
    transport: Arc<dyn HttpTransport>,
}

impl SpecExplorer {
    /// Create a spec explorer over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Fetch and normalize the OpenAPI document at `api_url`.
    ///
    /// # Errors
    ///
    /// - [`Error::ManifestValidation`] on a cross-domain redirect or an
    ///   unparseable document.
    /// - [`Error::ManifestFetch`] on a non-success status.
    pub async fn inspect(&self, api_url: &str) -> Result<OpenApiSpec> {
        let url = Url::parse(api_url)?;
        debug!(url = %url, "fetching OpenAPI document");

        let response = self.transport.execute(TransportRequest::get(url.clone())).await?;
        domain::validate_redirect(&url, &response.url)?;

        if !response.is_success() {
            return Err(Error::fetch(
                response.status,
                format!(
                    "fetching OpenAPI document failed with status {}",
                    response.status
                ),
            ));
        }

        OpenApiSpec::parse(response.text())
    }
}
