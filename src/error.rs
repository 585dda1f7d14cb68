//! Error types for the AI plugin client

use std::sync::Arc;

use thiserror::Error;

/// Result type alias for the AI plugin client
pub type Result<T> = std::result::Result<T, Error>;

/// AI plugin client errors
#[derive(Error, Debug)]
pub enum Error {
    /// Manifest or OpenAPI document retrieval failed
    #[error("Manifest fetch failed (status {status}): {message}")]
    ManifestFetch {
        /// HTTP status returned by the remote host
        status: u16,
        /// Error message
        message: String,
    },

    /// Manifest shape invalid or cross-domain policy violated
    #[error("Manifest validation failed: {message}")]
    ManifestValidation {
        /// Error message
        message: String,
        /// Underlying validation failure, when wrapping one
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// OAuth callback or token exchange failure
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Endpoint/method missing from the spec, unusable base URL,
    /// unsupported OpenAPI version, or missing service token
    #[error("Plugin API error: {0}")]
    PluginApi(String),

    /// The facade's memoized spec resolution failed; all callers observe
    /// the same underlying error
    #[error("Plugin spec resolution failed: {0}")]
    SpecResolution(#[source] Arc<Error>),

    /// URL parse error
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a validation error without an underlying cause
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ManifestValidation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a validation error wrapping an underlying cause
    pub fn validation_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ManifestValidation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a fetch error for a non-success HTTP status
    pub fn fetch(status: u16, message: impl Into<String>) -> Self {
        Self::ManifestFetch {
            status,
            message: message.into(),
        }
    }
}
