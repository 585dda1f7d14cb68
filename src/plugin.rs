//! Plugin facade.
//!
//! Composes a validated manifest with spec resolution and the invocation
//! engine behind a construct-once, call-many-times object. Spec resolution
//! starts the moment the facade is built and is memoized as a shared
//! future: every `interact` call, concurrent or sequential, observes the
//! same resolution outcome. A resolution failure poisons the facade — no
//! retry, no re-resolution.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use serde_json::Value;
use tracing::debug;

use crate::auth::TokenProvider;
use crate::invoke::OpenApiProvider;
use crate::manifest::PluginManifest;
use crate::openapi::SpecExplorer;
use crate::transport::{HttpMethod, HttpTransport, TransportResponse};
use crate::{Error, Result};

type SharedResolution = Shared<BoxFuture<'static, std::result::Result<Arc<OpenApiProvider>, Arc<Error>>>>;

/// An AI plugin, ready to be called against its OpenAPI-described API.
pub struct AiPlugin {
    manifest: PluginManifest,
    provider: SharedResolution,
}

impl AiPlugin {
    /// Build a plugin facade from a validated manifest.
    ///
    /// Resolution of the manifest's OpenAPI document begins immediately on
    /// a background task; `interact` awaits the memoized outcome. Must be
    /// called within a Tokio runtime.
    ///
    /// `service_name` selects the verification token when the manifest
    /// declares `service_http` auth.
    pub fn new(
        manifest: PluginManifest,
        transport: Arc<dyn HttpTransport>,
        service_name: impl Into<String>,
    ) -> Self {
        let explorer = SpecExplorer::new(Arc::clone(&transport));
        let api_url = manifest.api.url.clone();
        let auth = manifest.auth.clone();
        let service_name = service_name.into();

        let resolution: SharedResolution = async move {
            debug!(url = %api_url, "resolving plugin OpenAPI spec");
            let spec = explorer.inspect(&api_url).await.map_err(Arc::new)?;
            Ok(Arc::new(OpenApiProvider::new(
                spec,
                transport,
                auth,
                service_name,
            )))
        }
        .boxed()
        .shared();

        // Drive resolution eagerly; interact() awaits the same shared outcome.
        tokio::spawn(resolution.clone());

        Self {
            manifest,
            provider: resolution,
        }
    }

    /// Call an endpoint of the plugin's API.
    ///
    /// # Errors
    ///
    /// [`Error::SpecResolution`] when the one-shot spec resolution failed
    /// (the same underlying error is observed by every call), otherwise
    /// the invocation engine's errors.
    pub async fn interact(
        &self,
        endpoint: &str,
        method: HttpMethod,
        parameters: &Value,
        tokens: &dyn TokenProvider,
    ) -> Result<TransportResponse> {
        let provider = self
            .provider
            .clone()
            .await
            .map_err(Error::SpecResolution)?;
        provider.interact(endpoint, method, parameters, tokens).await
    }

    /// The validated manifest this facade was built from.
    #[must_use]
    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    /// Manifest schema version.
    #[must_use]
    pub fn schema_version(&self) -> &str {
        &self.manifest.schema_version
    }

    /// Name the model uses to target the plugin.
    #[must_use]
    pub fn name_for_model(&self) -> &str {
        &self.manifest.name_for_model
    }

    /// Human-readable plugin name.
    #[must_use]
    pub fn name_for_human(&self) -> &str {
        &self.manifest.name_for_human
    }

    /// Description tailored to the model.
    #[must_use]
    pub fn description_for_model(&self) -> &str {
        &self.manifest.description_for_model
    }

    /// Human-readable description.
    #[must_use]
    pub fn description_for_human(&self) -> &str {
        &self.manifest.description_for_human
    }

    /// URL of the plugin's logo.
    #[must_use]
    pub fn logo_url(&self) -> &str {
        &self.manifest.logo_url
    }

    /// Contact email declared by the plugin.
    #[must_use]
    pub fn contact_email(&self) -> &str {
        &self.manifest.contact_email
    }

    /// Legal information URL declared by the plugin.
    #[must_use]
    pub fn legal_info_url(&self) -> &str {
        &self.manifest.legal_info_url
    }
}
