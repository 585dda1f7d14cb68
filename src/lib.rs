//! AI Plugin Client
//!
//! Discovers, validates, and invokes third-party plugin services that
//! describe themselves via a well-known JSON manifest plus an OpenAPI
//! document.
//!
//! # Features
//!
//! - **Discovery**: resolve an origin to its well-known manifest, with a
//!   cross-domain redirect trust policy and manifest anti-spoofing checks
//! - **Invocation**: OpenAPI-version-aware request construction (v2, v3.0,
//!   v3.1) with query-vs-body method semantics
//! - **Authentication**: manifest-declared auth schemes (`none`,
//!   `service_http`, `user_http`, `oauth`) bridged to request headers,
//!   plus an OAuth authorization-code helper
//! - **Injectable transport**: all HTTP goes through a trait, so callers
//!   own timeout/cancellation policy and tests inject fakes
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ai_plugin::{AiPlugin, HttpMethod, PluginExplorer, ReqwestTransport, StaticTokens};
//!
//! # tokio_test::block_on(async {
//! let transport = Arc::new(ReqwestTransport::new());
//! let explorer = PluginExplorer::new(transport.clone());
//!
//! if let Some(manifest) = explorer.inspect("https://example.com/").await? {
//!     let plugin = AiPlugin::new(manifest, transport, "openai");
//!     let response = plugin
//!         .interact(
//!             "/todos",
//!             HttpMethod::Get,
//!             &serde_json::json!({"status": "open"}),
//!             &StaticTokens::default(),
//!         )
//!         .await?;
//!     println!("{}", response.text());
//! }
//! # Ok::<(), ai_plugin::Error>(())
//! # }).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod invoke;
pub mod manifest;
pub mod oauth;
pub mod openapi;
pub mod plugin;
pub mod transport;

pub use auth::{StaticTokens, TokenProvider};
pub use discovery::{PluginExplorer, WELL_KNOWN_MANIFEST_PATH};
pub use error::{Error, Result};
pub use invoke::OpenApiProvider;
pub use manifest::{ManifestAuth, PluginManifest};
pub use oauth::{ClientCredentials, OAuthAuthenticator, OAuthTokens};
pub use openapi::{OpenApiSpec, SpecExplorer};
pub use plugin::AiPlugin;
pub use transport::{
    HttpMethod, HttpTransport, ReqwestTransport, TransportRequest, TransportResponse,
};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing/logging
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        Some("json") => {
            subscriber.with(fmt::layer().json()).init();
        }
        _ => {
            subscriber.with(fmt::layer()).init();
        }
    }

    Ok(())
}
