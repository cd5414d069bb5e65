//! docker-credential-github-actions-oidc: credential helper binary
//!
//! The host runs this binary once per operation with the action as the only
//! argument. Uses a single-threaded tokio runtime (compatible with core's
//! !Send async traits); each run performs at most one HTTP round-trip.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gha_oidc_helper_core::audit::AuditLog;
use gha_oidc_helper_core::helper::GitHubActionsOidc;
use gha_oidc_helper_core::protocol::{self, ProgramInfo};
use gha_oidc_native::logfile::{default_log_path, open_audit_sink};
use gha_oidc_native::platform::{ProcessEnv, ReqwestHttpClient, SystemClock};

const PROGRAM_NAME: &str = "docker-credential-github-actions-oidc";

#[derive(Parser)]
#[command(name = PROGRAM_NAME, version, about)]
struct Cli {
    /// Action requested by the host: store, get, erase, list or version
    action: String,

    /// Audit log file [default: <temp dir>/github_actions_oidc.log]
    #[arg(long, env = "GITHUB_ACTIONS_OIDC_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let log_path = cli.log_file.unwrap_or_else(default_log_path);

    let audit = AuditLog::new(open_audit_sink(&log_path), Box::new(SystemClock));
    let helper = GitHubActionsOidc::new(
        Box::new(ProcessEnv),
        Box::new(ReqwestHttpClient::new()),
        audit,
    );

    let program = ProgramInfo {
        name: PROGRAM_NAME.to_string(),
        package: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let mut input = std::io::stdin().lock();
    let mut output = std::io::stdout().lock();

    let result = protocol::handle(&helper, &program, &cli.action, &mut input, &mut output).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(action = %cli.action, error = e.error_key(), "action failed");
            // The host reads error messages from stdout
            let _ = writeln!(output, "{}", e);
            let _ = output.flush();
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr; stdout is reserved for the host protocol
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
