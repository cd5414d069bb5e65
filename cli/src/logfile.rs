//! Audit log file location and opening

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name used when no log path is configured
pub const DEFAULT_LOG_FILE_NAME: &str = "github_actions_oidc.log";

/// Default audit log path inside the system temp directory
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_LOG_FILE_NAME)
}

/// Open `path` for appending, creating it if needed.
///
/// Falls back to a sink that discards everything when the file cannot be
/// opened, so a read-only temp directory never blocks credential lookups.
pub fn open_audit_sink(path: &Path) -> Box<dyn Write + Send> {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Box::new(file),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "cannot open audit log, discarding entries"
            );
            Box::new(std::io::sink())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gha-oidc-logfile-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_default_log_path_is_in_temp_dir() {
        let path = default_log_path();
        assert_eq!(path.parent(), Some(std::env::temp_dir().as_path()));
        assert!(path.ends_with(DEFAULT_LOG_FILE_NAME));
    }

    #[test]
    fn test_open_audit_sink_appends() {
        let path = scratch_path("append.log");
        let _ = fs::remove_file(&path);

        open_audit_sink(&path).write_all(b"first\n").unwrap();
        open_audit_sink(&path).write_all(b"second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_open_audit_sink_falls_back_when_unwritable() {
        let path = scratch_path("missing-dir").join("nested").join("audit.log");

        let mut sink = open_audit_sink(&path);

        assert!(sink.write_all(b"dropped\n").is_ok());
        assert!(!path.exists());
    }
}
