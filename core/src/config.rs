//! Token request configuration loaded from the CI environment

use url::form_urlencoded;

use crate::error::FetchError;
use crate::platform::Environment;

/// Token endpoint base URL, set by the runner when `id-token: write` is granted
pub const REQUEST_URL_VAR: &str = "ACTIONS_ID_TOKEN_REQUEST_URL";

/// Bearer credential for the token endpoint
pub const REQUEST_TOKEN_VAR: &str = "ACTIONS_ID_TOKEN_REQUEST_TOKEN";

/// Optional audience forwarded as the `audience` query parameter
pub const REQUEST_AUDIENCE_VAR: &str = "ACTIONS_ID_TOKEN_REQUEST_AUDIENCE";

/// User agent sent to the token endpoint
pub const USER_AGENT: &str = "Docker-Credential-Helper-GitHubActionsOIDC";

/// Username paired with every issued token
pub const IDENTITY: &str = "github_actions";

/// Token request configuration, read fresh for every fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequestConfig {
    /// Token endpoint base URL, possibly carrying its own query string
    pub request_url: String,
    /// Bearer token for the endpoint
    pub request_token: String,
    /// Intended recipient of the issued token
    pub audience: Option<String>,
}

impl TokenRequestConfig {
    /// Load configuration from the platform environment
    pub fn from_env(env: &dyn Environment) -> Result<Self, FetchError> {
        let request_url = env.get_var(REQUEST_URL_VAR).filter(|v| !v.is_empty());
        let request_token = env.get_var(REQUEST_TOKEN_VAR).filter(|v| !v.is_empty());

        match (request_url, request_token) {
            (Some(request_url), Some(request_token)) => Ok(Self {
                request_url,
                request_token,
                audience: env.get_var(REQUEST_AUDIENCE_VAR).filter(|v| !v.is_empty()),
            }),
            _ => Err(FetchError::MissingEnvironment),
        }
    }

    /// The URL to request, with the audience appended when one is configured
    pub fn token_url(&self) -> String {
        match &self.audience {
            Some(audience) => with_audience(&self.request_url, audience),
            None => self.request_url.clone(),
        }
    }

    /// `Authorization` header value
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.request_token)
    }
}

/// Append an escaped `audience` parameter, joining with `&` when the base
/// already has a query string
fn with_audience(base: &str, audience: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    let escaped: String = form_urlencoded::byte_serialize(audience.as_bytes()).collect();
    format!("{}{}audience={}", base, separator, escaped)
}
