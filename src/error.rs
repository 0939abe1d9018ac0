//! Error types for the swagger-clap crate.

use thiserror::Error;

/// Errors raised while building or driving the CLI.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    #[error("ambiguous flag --{flag} in operation {operation}: parameter names collide after lower-casing")]
    FlagCollision { operation: String, flag: String },

    #[error("invalid value for --{flag}: expected a JSON literal")]
    InvalidStructuredValue {
        flag: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid --basic credentials: expected a JSON object with \"username\" and \"password\"")]
    InvalidCredentials(#[source] serde_json::Error),

    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("unknown operation: {group} {operation}")]
    UnknownOperation { group: String, operation: String },

    #[error("no access token given and {path} does not exist")]
    MissingTokenFile { path: String },

    #[error("failed to read access token file {path}")]
    TokenFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A single operation's documentation could not be parsed.
///
/// Fatal only for that operation: the catalog build reports it and moves on.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocError {
    #[error("operation has no documentation")]
    Missing,

    #[error("parameter line has no description segment: {line:?}")]
    MissingDescription { line: String },

    #[error("parameter declaration must be \"<type> <name>\": {decl:?}")]
    BadDeclaration { decl: String },
}

/// The client library's transport-level failure, surfaced with its message.
///
/// Generated client invokers raise this for HTTP and marshaling failures. The
/// dispatcher catches it at one boundary, reports it, and exits normally.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}
