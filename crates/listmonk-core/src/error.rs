//! Error types for the Listmonk bridge

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Failure of a single bridge operation.
///
/// Every variant is scoped to one invocation; none of them is fatal to the
/// server process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListmonkError {
    /// Input rejected locally, before any network call
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Remote rejected the configured credentials
    #[error("Authentication failed (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    /// Remote reports the addressed entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Remote rejected the payload semantics
    #[error("Rejected by Listmonk (HTTP {status}): {message}")]
    RemoteValidation { status: u16, message: String },

    /// Remote unreachable, timed out or overloaded
    #[error("Listmonk unavailable: {message}")]
    Unavailable {
        status: Option<u16>,
        message: String,
    },

    /// Remote answered with something we could not interpret
    #[error("Unexpected response from Listmonk: {0}")]
    UnexpectedResponse(String),
}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, ListmonkError>;

/// Stable category of a [`ListmonkError`], used in structured tool results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Authentication,
    NotFound,
    RemoteValidation,
    Unavailable,
    UnexpectedResponse,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Authentication => "authentication",
            Self::NotFound => "not_found",
            Self::RemoteValidation => "remote_validation",
            Self::Unavailable => "unavailable",
            Self::UnexpectedResponse => "unexpected_response",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ListmonkError {
    /// Create a Validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a NotFound error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an Unavailable error without an HTTP status
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable {
            status: None,
            message: msg.into(),
        }
    }

    /// Create an UnexpectedResponse error
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::UnexpectedResponse(msg.into())
    }

    /// Map a non-2xx HTTP status and the remote's message to the taxonomy.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Authentication { status, message },
            404 => Self::NotFound(message),
            408 | 429 | 500..=599 => Self::Unavailable {
                status: Some(status),
                message,
            },
            400..=499 => Self::RemoteValidation { status, message },
            _ => Self::UnexpectedResponse(format!("HTTP {}: {}", status, message)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::RemoteValidation { .. } => ErrorKind::RemoteValidation,
            Self::Unavailable { .. } => ErrorKind::Unavailable,
            Self::UnexpectedResponse(_) => ErrorKind::UnexpectedResponse,
        }
    }

    /// HTTP status that produced this error, if it came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::RemoteValidation { status, .. } => {
                Some(*status)
            }
            Self::NotFound(_) => Some(404),
            Self::Unavailable { status, .. } => *status,
            Self::Validation(_) | Self::UnexpectedResponse(_) => None,
        }
    }

    /// Structured payload for MCP tool results.
    pub fn to_json(&self) -> Value {
        json!({
            "kind": self.kind(),
            "message": self.to_string(),
            "status_code": self.status_code(),
        })
    }
}

impl From<serde_json::Error> for ListmonkError {
    fn from(err: serde_json::Error) -> Self {
        ListmonkError::UnexpectedResponse(err.to_string())
    }
}

/// Configuration errors, raised at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting was not provided
    #[error("{name} is required (set {env})")]
    Missing {
        name: &'static str,
        env: &'static str,
    },
    /// URL does not use an HTTP scheme
    #[error("URL must start with http:// or https://, got '{0}'")]
    InvalidScheme(String),
    /// URL could not be parsed
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    /// Timeout must be positive
    #[error("Timeout must be positive, got {0}")]
    InvalidTimeout(u64),
    /// Unknown log level name
    #[error("Log level must be one of DEBUG, INFO, WARNING, ERROR, CRITICAL, got '{0}'")]
    InvalidLogLevel(String),
    /// A value that should be a number or boolean was not
    #[error("Invalid value for {env}: '{value}'")]
    InvalidValue { env: &'static str, value: String },
    /// Credentials cannot be carried in an HTTP header
    #[error("Username and API token must be visible ASCII without ':' in the username")]
    InvalidCredentials,
    /// The .env file could not be loaded
    #[error("Failed to load env file {path}: {reason}")]
    EnvFile { path: String, reason: String },
}
