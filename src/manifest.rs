//! Plugin manifest wire shape.
//!
//! A plugin self-declares its identity, authentication scheme, and OpenAPI
//! document location through a JSON manifest served at a well-known path.
//! Shape validation is serde deserialization; cross-domain checks live in
//! [`crate::discovery`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A validated plugin manifest. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Manifest schema version
    pub schema_version: String,
    /// Name the model will use to target the plugin
    pub name_for_model: String,
    /// Human-readable name, such as the full company name
    pub name_for_human: String,
    /// Description tailored to the model
    pub description_for_model: String,
    /// Human-readable description of the plugin
    pub description_for_human: String,
    /// Authentication scheme
    pub auth: ManifestAuth,
    /// Location of the plugin's OpenAPI document
    pub api: PluginApi,
    /// URL used to fetch the plugin's logo
    pub logo_url: String,
    /// Email contact for safety/moderation reachout, support, and deactivation
    pub contact_email: String,
    /// URL for users to view plugin information
    pub legal_info_url: String,
}

/// Authentication scheme declared by a manifest, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ManifestAuth {
    /// No authentication
    None {
        /// Free-form guidance for obtaining credentials
        #[serde(default, skip_serializing_if = "Option::is_none")]
        instructions: Option<String>,
    },
    /// App-level API key, looked up by service name
    ServiceHttp {
        /// Header scheme for the token
        authorization_type: HttpAuthorizationType,
        /// Static verification token per consuming service
        verification_token: HashMap<String, String>,
        /// Free-form guidance for obtaining credentials
        #[serde(default, skip_serializing_if = "Option::is_none")]
        instructions: Option<String>,
    },
    /// Per-end-user HTTP token supplied at call time
    UserHttp {
        /// Header scheme for the token
        authorization_type: HttpAuthorizationType,
        /// Free-form guidance for obtaining credentials
        #[serde(default, skip_serializing_if = "Option::is_none")]
        instructions: Option<String>,
    },
    /// Three-legged OAuth
    Oauth(OAuthConfig),
}

/// OAuth configuration declared by a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// URL where a user is directed to begin the OAuth flow
    pub client_url: String,
    /// OAuth scopes required to act on the user's behalf
    pub scope: String,
    /// Endpoint used to exchange an OAuth code for an access token
    pub authorization_url: String,
    /// Content type expected by the token exchange endpoint
    pub authorization_content_type: String,
    /// Verification tokens surfaced when registering OAuth client credentials
    pub verification_tokens: HashMap<String, String>,
    /// Free-form guidance for obtaining credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// HTTP Authorization header scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpAuthorizationType {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// `Authorization: Basic <token>`
    Basic,
}

/// The manifest's `api` object: where and how the plugin's API is described.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginApi {
    /// Description format; only OpenAPI is defined
    #[serde(rename = "type")]
    pub kind: ApiDescriptionKind,
    /// URL of the OpenAPI document; its origin is the plugin's declared
    /// API origin
    pub url: String,
    /// Whether calls require end-user authentication
    #[serde(alias = "has_user_authentication")]
    pub is_user_authenticated: bool,
}

/// Supported API description formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiDescriptionKind {
    /// An OpenAPI (v2/v3.x) document
    Openapi,
}
