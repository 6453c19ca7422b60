//! Error types for the clothop CLI

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for clothop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API outcomes other than success.
///
/// Each origin of failure keeps its own variant so callers can tell
/// "log in again" apart from "forbidden", "fix your input" and "server unreachable".
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session expired. Run `clothop login` to sign in again.")]
    SessionExpired,

    #[error("Authentication failed. Run `clothop login` to sign in.")]
    Unauthorized,

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Initial setup has not been completed. Run `clothop setup` first.")]
    SetupRequired,

    #[error("Bad request: {message}{}", format_field_errors(.field_errors))]
    BadRequest {
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {message}")]
    Conflict {
        code: Option<String>,
        message: String,
    },

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Server unreachable: {0}")]
    Unreachable(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// True for outcomes that require signing in again.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, ApiError::SessionExpired | ApiError::Unauthorized)
    }

    /// Input rejected before it reaches the service.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        ApiError::BadRequest {
            message: format!("invalid {}", field),
            field_errors: BTreeMap::from([(field.to_string(), message)]),
        }
    }
}

fn format_field_errors(errors: &BTreeMap<String, String>) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let fields: Vec<String> = errors
        .iter()
        .map(|(field, msg)| format!("{}: {}", field, msg))
        .collect();
    format!(" ({})", fields.join(", "))
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Unreachable("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Unreachable("Failed to connect to API".to_string())
        } else {
            ApiError::Unreachable(err.to_string())
        }
    }
}

/// Error body returned by the service on failed requests.
///
/// Different endpoints name the machine-readable code differently, so all
/// three spellings are accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub errors: BTreeMap<String, String>,

    #[serde(default)]
    pub error_code: Option<String>,

    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub setup_required: bool,
}

impl ErrorBody {
    /// Parse a response body, falling back to treating plain text as the message.
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed,
            Err(_) => {
                let trimmed = body.trim();
                Self {
                    message: (!trimmed.is_empty()).then(|| trimmed.to_string()),
                    ..Self::default()
                }
            }
        }
    }

    /// Machine-readable error code, whichever field carried it.
    pub fn code(&self) -> Option<&str> {
        self.error_code
            .as_deref()
            .or(self.code.as_deref())
            .or(self.error.as_deref())
    }

    /// Human-readable message or the provided fallback.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Credential storage errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage unavailable: {0}")]
    Storage(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),
}
