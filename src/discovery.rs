//! Plugin manifest discovery.
//!
//! Resolves an origin URL to the well-known manifest location, fetches it,
//! applies the cross-domain redirect policy, validates the payload shape,
//! and cross-checks the manifest's self-declared URLs against the hosting
//! origin. Discovery does not cache; callers that need caching own it.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::domain;
use crate::manifest::PluginManifest;
use crate::transport::{HttpTransport, TransportRequest};
use crate::{Error, Result};

/// Conventional path where a plugin manifest is expected to be found.
pub const WELL_KNOWN_MANIFEST_PATH: &str = "/.well-known/ai-plugin.json";

/// Finds and validates plugin manifests for an origin.
///
/// Does not provide capabilities to interact with the plugin; see
/// [`crate::plugin::AiPlugin`] for that.
pub struct PluginExplorer {
    transport: Arc<dyn HttpTransport>,
    manifest_path: String,
}

impl PluginExplorer {
    /// Create an explorer using the standard well-known manifest path.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_manifest_path(transport, WELL_KNOWN_MANIFEST_PATH)
    }

    /// Create an explorer with a custom manifest path (must start with `/`).
    pub fn with_manifest_path(
        transport: Arc<dyn HttpTransport>,
        manifest_path: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            manifest_path: manifest_path.into(),
        }
    }

    /// Discover the plugin manifest for an origin URL.
    ///
    /// Returns `Ok(None)` when the origin serves no manifest (HTTP 404) —
    /// absence of a plugin is an expected discovery outcome, not an error.
    ///
    /// # Errors
    ///
    /// - [`Error::ManifestFetch`] for any other non-success status.
    /// - [`Error::ManifestValidation`] when the fetch was redirected
    ///   outside the root domain, the payload shape is invalid, or the
    ///   manifest's declared URLs fail the cross-domain checks.
    pub async fn inspect(&self, origin_url: &str) -> Result<Option<PluginManifest>> {
        let manifest_url = self.resolve_manifest_url(origin_url)?;
        debug!(url = %manifest_url, "fetching plugin manifest");

        let response = self
            .transport
            .execute(TransportRequest::get(manifest_url.clone()))
            .await?;
        domain::validate_redirect(&manifest_url, &response.url)?;

        if !response.is_success() {
            if response.status == 404 {
                debug!(url = %manifest_url, "no plugin manifest present");
                return Ok(None);
            }
            return Err(Error::fetch(
                response.status,
                format!("manifest request failed with status {}", response.status),
            ));
        }

        let manifest: PluginManifest = serde_json::from_str(response.text())
            .map_err(|e| Error::validation_with("manifest failed shape validation", e))?;
        cross_validate(&manifest_url, &manifest)?;

        debug!(plugin = %manifest.name_for_model, "discovered plugin manifest");
        Ok(Some(manifest))
    }

    fn resolve_manifest_url(&self, origin_url: &str) -> Result<Url> {
        let mut url = Url::parse(origin_url)?;
        if url.path() != self.manifest_path {
            url.set_path(&self.manifest_path);
        }
        Ok(url)
    }
}

/// Anti-spoofing checks tying the manifest's self-declared URLs back to
/// the origin it was served from.
fn cross_validate(manifest_url: &Url, manifest: &PluginManifest) -> Result<()> {
    let api_url = Url::parse(&manifest.api.url)
        .map_err(|e| Error::validation_with("manifest declares an invalid api.url", e))?;
    domain::validate_redirect(manifest_url, &api_url)?;

    let legal_url = Url::parse(&manifest.legal_info_url)
        .map_err(|e| Error::validation_with("manifest declares an invalid legal_info_url", e))?;
    if !domain::is_same_second_domain(manifest_url, &legal_url) {
        return Err(Error::validation(
            "legal_info_url does not share the plugin's second-level domain",
        ));
    }

    let email_domain = manifest
        .contact_email
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
        .ok_or_else(|| Error::validation("contact_email has no domain part"))?;
    let manifest_host = manifest_url
        .host_str()
        .ok_or_else(|| Error::validation("manifest URL has no host"))?;
    if !domain::hosts_share_second_level(manifest_host, email_domain) {
        return Err(Error::validation(
            "contact_email does not share the plugin's second-level domain",
        ));
    }

    Ok(())
}
