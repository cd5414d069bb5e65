//! Native adapter for the GitHub Actions OIDC credential helper
//!
//! Wires the platform-agnostic core to the process environment, a reqwest
//! HTTP client, the system clock and an append-only audit log file.

pub mod logfile;
pub mod platform;
