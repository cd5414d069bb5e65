//! Credential helper contract and the GitHub Actions OIDC implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::audit::AuditLog;
use crate::error::Result;
use crate::exchange;
use crate::platform::{Environment, HttpClient};

/// Credentials exchanged with the host, in the host's field casing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "ServerURL", default)]
    pub server_url: String,
    #[serde(rename = "Username", default)]
    pub username: String,
    #[serde(rename = "Secret", default)]
    pub secret: String,
}

/// The four operations a credential helper exposes to its host
#[async_trait(?Send)]
pub trait CredentialHelper {
    /// Persist credentials for a server
    async fn store(&self, credentials: &Credentials) -> Result<()>;

    /// Remove credentials for a server
    async fn erase(&self, server_url: &str) -> Result<()>;

    /// Return `(username, secret)` for a server
    async fn get(&self, server_url: &str) -> Result<(String, String)>;

    /// Map of server URL to username for every stored credential
    async fn list(&self) -> Result<HashMap<String, String>>;
}

/// Helper that answers every lookup with a fresh GitHub Actions ID token.
///
/// Nothing is stored: `store` and `erase` only leave an audit trail and
/// `list` is always empty.
pub struct GitHubActionsOidc {
    env: Box<dyn Environment>,
    http: Box<dyn HttpClient>,
    audit: AuditLog,
}

impl GitHubActionsOidc {
    pub fn new(env: Box<dyn Environment>, http: Box<dyn HttpClient>, audit: AuditLog) -> Self {
        Self { env, http, audit }
    }
}

#[async_trait(?Send)]
impl CredentialHelper for GitHubActionsOidc {
    async fn store(&self, credentials: &Credentials) -> Result<()> {
        self.audit.record(format_args!(
            "Adding credentials for server: {}",
            credentials.server_url
        ));
        Ok(())
    }

    async fn erase(&self, server_url: &str) -> Result<()> {
        self.audit
            .record(format_args!("Deleting credentials for server: {}", server_url));
        Ok(())
    }

    async fn get(&self, server_url: &str) -> Result<(String, String)> {
        let credential =
            exchange::fetch_token(server_url, self.env.as_ref(), self.http.as_ref(), &self.audit)
                .await?;
        Ok((credential.username, credential.secret))
    }

    async fn list(&self) -> Result<HashMap<String, String>> {
        self.audit.record("Listing credentials");
        Ok(HashMap::new())
    }
}
