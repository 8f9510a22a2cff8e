/// Client error taxonomy
///
/// Every fallible client operation returns [`ClientResult`]. The first six
/// variants are the application-level failures callers branch on; the rest
/// wrap infrastructure failures.

use crate::transport::ApiResponse;
use serde::Deserialize;
use std::fmt;

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name as it appears on the wire (camelCase)
    pub field: String,

    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors returned by the client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The identity provider has no signed-in principal
    #[error("No active session")]
    NoSession,

    /// A session exists but carries no access token
    #[error("No access token available")]
    MissingToken,

    /// The API rejected the token (HTTP 401)
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Resolving or creating the application user failed
    #[error("User sync failed: {0}")]
    SyncFailure(String),

    /// One or more fields failed validation
    #[error("Validation failed: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Validation(Vec<FieldError>),

    /// The API answered with a non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The identity provider failed
    #[error("Identity provider error: {0}")]
    Identity(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ClientError {
    /// Builds a `Server` error from a non-success response
    ///
    /// Uses the API's `{ "message": ... }` body when present, otherwise the
    /// raw body text.
    pub fn from_response(response: &ApiResponse) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(&response.body)
            .map(|body| body.message)
            .unwrap_or_else(|_| String::from_utf8_lossy(&response.body).into_owned());

        ClientError::Server {
            status: response.status.as_u16(),
            message,
        }
    }

    /// HTTP status carried by a `Server` error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
