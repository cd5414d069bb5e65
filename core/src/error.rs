//! Error types and host-facing message mapping

use thiserror::Error;

/// Result type alias for helper operations
pub type Result<T> = std::result::Result<T, HelperError>;

/// Errors surfaced to the host process.
///
/// The `Display` output of each variant is exactly what the host reads back
/// from stdout, so the wording is part of the protocol.
#[derive(Error, Debug)]
pub enum HelperError {
    /// Hosts match on this message to fall back to another credential source
    #[error("credentials not found in native keychain")]
    CredentialsNotFound,

    #[error("no credentials server URL")]
    MissingServerUrl,

    #[error("no credentials username")]
    MissingUsername,

    #[error("invalid credentials payload: {message}")]
    InvalidPayload { message: String },

    #[error("{program}: unknown action: {action}")]
    UnknownAction { program: String, action: String },

    #[error("i/o error: {message}")]
    Io { message: String },

    #[error("failed to encode response: {message}")]
    Encode { message: String },
}

impl HelperError {
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    pub fn unknown_action(program: impl Into<String>, action: impl Into<String>) -> Self {
        Self::UnknownAction {
            program: program.into(),
            action: action.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Whether this is the uniform not-found outcome of a fetch
    pub fn is_credentials_not_found(&self) -> bool {
        matches!(self, Self::CredentialsNotFound)
    }

    /// Short machine-readable key, used as a tracing field
    pub fn error_key(&self) -> &'static str {
        match self {
            Self::CredentialsNotFound => "credentials_not_found",
            Self::MissingServerUrl => "missing_server_url",
            Self::MissingUsername => "missing_username",
            Self::InvalidPayload { .. } => "invalid_payload",
            Self::UnknownAction { .. } => "unknown_action",
            Self::Io { .. } => "io_error",
            Self::Encode { .. } => "encode_error",
        }
    }
}

impl From<std::io::Error> for HelperError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// Why a token fetch failed.
///
/// These never reach the host directly: every variant collapses into
/// [`HelperError::CredentialsNotFound`] once it has been written to the
/// audit log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("missing OIDC request URL or token")]
    MissingEnvironment,

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("unexpected HTTP status: {status}")]
    UnexpectedStatus { status: u16 },

    #[error("decode error: {message}")]
    Decode { message: String },
}

impl FetchError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn error_key(&self) -> &'static str {
        match self {
            Self::MissingEnvironment => "missing_environment",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Transport { .. } => "transport_error",
            Self::UnexpectedStatus { .. } => "unexpected_status",
            Self::Decode { .. } => "decode_error",
        }
    }
}

impl From<FetchError> for HelperError {
    fn from(_: FetchError) -> Self {
        Self::CredentialsNotFound
    }
}
