//! Platform abstraction traits
//!
//! These traits define the boundary between the platform-agnostic helper
//! logic and the native process it runs in (environment variables, the HTTP
//! stack and the wall clock).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// HTTP client for the token endpoint
#[async_trait(?Send)]
pub trait HttpClient {
    /// Issue a GET request.
    ///
    /// Implementations report an unparseable URL as
    /// [`FetchError::InvalidRequest`] and connection-level failures as
    /// [`FetchError::Transport`]. Any status code is a successful response.
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, FetchError>;
}

/// HTTP response from an outbound request
///
/// The body is fully read and owned, so the underlying connection is released
/// before the caller inspects the status.
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Parse body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Clock for current time (enables testing with deterministic timestamps)
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Environment variable access
pub trait Environment {
    /// Returns the variable's value, or `None` when it is unset or empty
    fn get_var(&self, name: &str) -> Option<String>;
}
