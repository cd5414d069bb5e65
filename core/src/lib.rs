//! gha-oidc-helper-core: Platform-agnostic core of the GitHub Actions OIDC credential helper
//!
//! This crate answers container registry credential lookups with a freshly
//! requested GitHub Actions ID token. It depends only on abstract platform
//! traits (Environment, HttpClient, Clock) and never imports
//! platform-specific code.

pub mod audit;
pub mod config;
pub mod error;
pub mod exchange;
pub mod helper;
pub mod platform;
pub mod protocol;

#[cfg(test)]
pub mod test_support;
