//! Transport configuration built once per invocation.
//!
//! A fresh `Configuration` is assembled from the parsed global/auth flags,
//! handed to the client library's invokers for the single call, then dropped.

use std::path::Path;

use serde::Deserialize;

use crate::error::CliError;

/// Default file consulted when `--access_token` is given without a value.
pub const ACCESS_TOKEN_FILE: &str = ".access_token";

/// Transport settings bound to one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Proxy URL forwarded verbatim to the transport.
    pub proxy: Option<String>,
    /// TLS certificate verification. On unless `--insecure` was given.
    pub verify_ssl: bool,
    /// Debug mode. Follows `--verbose` directly.
    pub debug: bool,
    /// Exactly one auth mode per invocation.
    pub auth: AuthMode,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            proxy: None,
            verify_ssl: true,
            debug: false,
            auth: AuthMode::None,
        }
    }
}

/// The mutually exclusive authentication modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    None,
    Bearer(String),
    Basic(BasicCredentials),
    ApiKey(String),
}

/// Credentials decoded from the `--basic` JSON literal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Read a bearer token from `.access_token` in the working directory.
pub fn load_access_token() -> Result<String, CliError> {
    load_access_token_from(Path::new(ACCESS_TOKEN_FILE))
}

/// Read a bearer token from `path`, stripping trailing whitespace.
pub fn load_access_token_from(path: &Path) -> Result<String, CliError> {
    if !path.exists() {
        return Err(CliError::MissingTokenFile {
            path: path.display().to_string(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| CliError::TokenFileRead {
        path: path.display().to_string(),
        source,
    })?;
    Ok(text.trim_end().to_string())
}
