//! OIDC token exchange
//!
//! Requests an ID token from the GitHub Actions token endpoint using the
//! runner-provided request URL and bearer token.

use serde::Deserialize;

use crate::audit::AuditLog;
use crate::config::{TokenRequestConfig, IDENTITY, USER_AGENT};
use crate::error::FetchError;
use crate::platform::{Environment, HttpClient, HttpResponse};

/// Token endpoint response (partial)
#[derive(Deserialize)]
struct TokenResponse {
    value: String,
}

/// Credential pair handed back to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredential {
    pub username: String,
    pub secret: String,
}

/// Exchange the ambient request token for an OIDC ID token.
///
/// `server_url` is only recorded in the audit log; the token is scoped to a
/// registry solely through the audience variable. Every failure is logged
/// before it is returned.
pub async fn fetch_token(
    server_url: &str,
    env: &dyn Environment,
    http: &dyn HttpClient,
    audit: &AuditLog,
) -> Result<IssuedCredential, FetchError> {
    audit.record(format_args!("Getting OIDC token: {}", server_url));

    let result = request_token(env, http, audit).await;

    match &result {
        Ok(credential) => {
            tracing::info!(server_url, "retrieved OIDC token");
            audit.record(format_args!("Successfully retrieved OIDC token: {}", credential.secret));
        }
        Err(e) => {
            // Expected outside CI, where the host falls back to other sources
            tracing::info!(
                server_url,
                reason = e.error_key(),
                error = %e,
                "no OIDC token available"
            );
        }
    }

    result
}

async fn request_token(
    env: &dyn Environment,
    http: &dyn HttpClient,
    audit: &AuditLog,
) -> Result<IssuedCredential, FetchError> {
    // 1. Both request variables must be present
    let config = TokenRequestConfig::from_env(env).inspect_err(|_| {
        audit.record("Missing OIDC request URL or token");
    })?;

    // 2. Scope the token to the configured audience
    let url = config.token_url();
    if config.audience.is_some() {
        audit.record(format_args!("Added OIDC audience to request URL: {}", url));
    }

    // 3. Send the request
    let authorization = config.authorization();
    let headers = [
        ("Authorization", authorization.as_str()),
        ("User-Agent", USER_AGENT),
    ];

    tracing::debug!(%url, "requesting OIDC token");

    let response = http.get(&url, &headers).await.inspect_err(|e| match e {
        FetchError::InvalidRequest { message } => {
            audit.record(format_args!("Failed to create HTTP request: {}", message))
        }
        FetchError::Transport { message } => {
            audit.record(format_args!("Failed to send HTTP request: {}", message))
        }
        other => audit.record(format_args!("Failed to send HTTP request: {}", other)),
    })?;

    // 4. Only 200 carries a token
    if response.status != 200 {
        audit.record(format_args!("Received non-OK HTTP status: {}", response.status));
        return Err(FetchError::UnexpectedStatus {
            status: response.status,
        });
    }

    // 5. Decode `{"value": "..."}`
    let token = decode_token_response(&response).map_err(|e| {
        audit.record(format_args!("Failed to decode HTTP response: {}", e));
        FetchError::decode(e.to_string())
    })?;

    Ok(IssuedCredential {
        username: IDENTITY.to_string(),
        secret: token.value,
    })
}

/// Decode the body as a JSON object carrying a string `value`.
///
/// Goes through a map first: a derived struct `Deserialize` would also accept
/// a positional array such as `["abc"]`.
fn decode_token_response(response: &HttpResponse) -> Result<TokenResponse, serde_json::Error> {
    let object: serde_json::Map<String, serde_json::Value> = response.json()?;
    TokenResponse::deserialize(serde_json::Value::Object(object))
}
