//! Host protocol
//!
//! The host runs the helper once per operation with the action name as the
//! only argument, writes the action's payload to stdin and reads the result
//! from stdout. Errors are reported as a single line on stdout together with
//! a non-zero exit status.

use std::io::{Read, Write};

use crate::error::{HelperError, Result};
use crate::helper::{CredentialHelper, Credentials};

/// Identification printed by the `version` action
pub struct ProgramInfo {
    pub name: String,
    pub package: String,
    pub version: String,
}

/// Actions understood by the helper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Store,
    Get,
    Erase,
    List,
    Version,
}

impl Action {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "store" => Some(Self::Store),
            "get" => Some(Self::Get),
            "erase" => Some(Self::Erase),
            "list" => Some(Self::List),
            "version" => Some(Self::Version),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::Get => "get",
            Self::Erase => "erase",
            Self::List => "list",
            Self::Version => "version",
        }
    }
}

/// Run one action against `helper`, reading its payload from `input` and
/// writing its result to `output`.
pub async fn handle(
    helper: &dyn CredentialHelper,
    program: &ProgramInfo,
    action: &str,
    input: &mut dyn Read,
    output: &mut dyn Write,
) -> Result<()> {
    let action = Action::parse(action)
        .ok_or_else(|| HelperError::unknown_action(&program.name, action))?;

    tracing::debug!(action = action.as_str(), "handling host request");

    match action {
        Action::Store => store(helper, input).await,
        Action::Get => get(helper, input, output).await,
        Action::Erase => erase(helper, input).await,
        Action::List => list(helper, output).await,
        Action::Version => {
            writeln!(output, "{} ({}) {}", program.name, program.package, program.version)?;
            Ok(())
        }
    }
}

async fn store(helper: &dyn CredentialHelper, input: &mut dyn Read) -> Result<()> {
    let payload = read_payload(input)?;
    let credentials: Credentials =
        serde_json::from_str(&payload).map_err(|e| HelperError::invalid_payload(e.to_string()))?;

    if credentials.server_url.is_empty() {
        return Err(HelperError::MissingServerUrl);
    }
    if credentials.username.is_empty() {
        return Err(HelperError::MissingUsername);
    }

    helper.store(&credentials).await
}

async fn get(
    helper: &dyn CredentialHelper,
    input: &mut dyn Read,
    output: &mut dyn Write,
) -> Result<()> {
    let server_url = read_server_url(input)?;
    let (username, secret) = helper.get(&server_url).await?;

    let credentials = Credentials {
        server_url,
        username,
        secret,
    };
    write_json(output, &credentials)
}

async fn erase(helper: &dyn CredentialHelper, input: &mut dyn Read) -> Result<()> {
    let server_url = read_server_url(input)?;
    helper.erase(&server_url).await
}

async fn list(helper: &dyn CredentialHelper, output: &mut dyn Write) -> Result<()> {
    let accounts = helper.list().await?;
    write_json(output, &accounts)
}

fn read_payload(input: &mut dyn Read) -> Result<String> {
    let mut payload = String::new();
    input.read_to_string(&mut payload)?;
    Ok(payload)
}

/// Server URL from the payload, with surrounding whitespace removed
fn read_server_url(input: &mut dyn Read) -> Result<String> {
    let payload = read_payload(input)?;
    let server_url = payload.trim();
    if server_url.is_empty() {
        return Err(HelperError::MissingServerUrl);
    }
    Ok(server_url.to_string())
}

fn write_json<T: serde::Serialize>(output: &mut dyn Write, value: &T) -> Result<()> {
    let json = serde_json::to_string(value).map_err(|e| HelperError::encode(e.to_string()))?;
    writeln!(output, "{}", json)?;
    output.flush()?;
    Ok(())
}
