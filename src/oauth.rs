//! OAuth authorization-code helper.
//!
//! Optional companion to `oauth`-type manifests: builds the authorization
//! redirect URL and exchanges the callback code for tokens against the
//! manifest-declared token endpoint.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::manifest::OAuthConfig;
use crate::transport::{HttpMethod, HttpTransport, TransportRequest};
use crate::{Error, Result};

/// OAuth client credentials the plugin's developer hands to consumers of
/// the plugin.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    /// Registered OAuth client ID
    pub client_id: String,
    /// Registered OAuth client secret
    pub client_secret: String,
}

/// Tokens obtained from a completed authorization-code exchange.
#[derive(Debug, Clone)]
pub struct OAuthTokens {
    /// Access token for subsequent API calls
    pub access_token: String,
    /// Refresh token, when the plugin issues one
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
}

/// Drives the three-legged OAuth flow declared by a plugin manifest.
pub struct OAuthAuthenticator {
    config: OAuthConfig,
    credentials: ClientCredentials,
    redirect_uri: String,
    transport: Arc<dyn HttpTransport>,
}

impl OAuthAuthenticator {
    /// Create an authenticator for a manifest's OAuth configuration.
    pub fn new(
        config: OAuthConfig,
        credentials: ClientCredentials,
        redirect_uri: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            config,
            credentials,
            redirect_uri: redirect_uri.into(),
            transport,
        }
    }

    /// Build the URL a user is directed to for the authorization flow.
    pub fn authentication_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.config.client_url)?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.credentials.client_id)
            .append_pair("scope", &self.config.scope)
            .append_pair("redirect_uri", &self.redirect_uri);
        Ok(url)
    }

    /// Complete the flow from the URL the user was redirected back to:
    /// extract the authorization code and exchange it for tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] when the callback carries no
    /// `code` parameter or the token exchange fails.
    pub async fn handle_callback(&self, redirected_url: &str) -> Result<OAuthTokens> {
        let url = Url::parse(redirected_url)?;
        let code = url
            .query_pairs()
            .find(|(name, _)| name == "code")
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| {
                Error::Authentication(
                    "no authorization code provided in OAuth callback".to_string(),
                )
            })?;

        self.exchange_code(&code).await
    }

    /// Exchange an authorization code for tokens.
    async fn exchange_code(&self, code: &str) -> Result<OAuthTokens> {
        let body = serde_json::json!({
            "grant_type": "authorization_code",
            "client_id": self.credentials.client_id,
            "client_secret": self.credentials.client_secret,
            "code": code,
            "redirect_uri": self.redirect_uri,
        });

        let mut request = Url::parse(&self.config.authorization_url)
            .map(|url| TransportRequest::new(url, HttpMethod::Post))?;
        request.headers.insert(
            "Content-Type".to_string(),
            self.config.authorization_content_type.clone(),
        );
        request.body = Some(body.to_string());

        debug!(endpoint = %self.config.authorization_url, "exchanging authorization code");
        let response = self.transport.execute(request).await?;

        if !response.is_success() {
            return Err(Error::Authentication(format!(
                "token exchange failed with status {}",
                response.status
            )));
        }

        let tokens: TokenResponse = response
            .json()
            .map_err(|e| Error::Authentication(format!("invalid token response: {e}")))?;

        Ok(OAuthTokens {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }
}
