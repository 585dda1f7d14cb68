//! Authentication strategy.
//!
//! Bridges a manifest-declared auth scheme and a caller-supplied token
//! source to the `Authorization` header of an outbound request. Stateless;
//! the only configuration is the manifest-fixed service name used for
//! `service_http` token lookup.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::manifest::{HttpAuthorizationType, ManifestAuth};
use crate::{Error, Result};

/// Caller-supplied source of per-call tokens.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// OAuth access token for the current end user.
    async fn oauth_token(&self) -> Result<String>;

    /// Per-end-user HTTP token (`user_http` auth).
    async fn user_token(&self) -> Result<String>;
}

/// A [`TokenProvider`] over fixed tokens. Requesting a token kind that was
/// not supplied fails with [`Error::Authentication`].
#[derive(Debug, Clone, Default)]
pub struct StaticTokens {
    /// OAuth access token, if any
    pub oauth_token: Option<String>,
    /// Per-user HTTP token, if any
    pub user_token: Option<String>,
}

#[async_trait]
impl TokenProvider for StaticTokens {
    async fn oauth_token(&self) -> Result<String> {
        self.oauth_token
            .clone()
            .ok_or_else(|| Error::Authentication("no OAuth token available".to_string()))
    }

    async fn user_token(&self) -> Result<String> {
        self.user_token
            .clone()
            .ok_or_else(|| Error::Authentication("no user token available".to_string()))
    }
}

/// Produce the HTTP headers required by a manifest's auth scheme.
///
/// # Errors
///
/// - [`Error::PluginApi`] when `service_http` auth declares no token for
///   `service_name`.
/// - [`Error::Authentication`] when the token provider cannot supply the
///   required token.
pub async fn auth_headers(
    auth: &ManifestAuth,
    tokens: &dyn TokenProvider,
    service_name: &str,
) -> Result<HashMap<String, String>> {
    match auth {
        ManifestAuth::None { .. } => Ok(HashMap::new()),
        ManifestAuth::Oauth(_) => {
            let token = tokens.oauth_token().await?;
            Ok(authorization(format!("Bearer {token}")))
        }
        ManifestAuth::ServiceHttp {
            authorization_type,
            verification_token,
            ..
        } => {
            let token = verification_token.get(service_name).ok_or_else(|| {
                Error::PluginApi(format!("no API token provided for service {service_name}"))
            })?;
            Ok(authorization(format_header(*authorization_type, token)))
        }
        ManifestAuth::UserHttp {
            authorization_type, ..
        } => {
            let token = tokens.user_token().await?;
            Ok(authorization(format_header(*authorization_type, &token)))
        }
    }
}

fn format_header(authorization_type: HttpAuthorizationType, token: &str) -> String {
    match authorization_type {
        HttpAuthorizationType::Bearer => format!("Bearer {token}"),
        HttpAuthorizationType::Basic => format!("Basic {token}"),
    }
}

fn authorization(value: String) -> HashMap<String, String> {
    HashMap::from([("Authorization".to_string(), value)])
}
