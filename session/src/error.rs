//! Error taxonomy for the session core.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here is fatal. [`AuthError`] values are produced by transports and
//! folded by the store into user-facing strings; [`DecodeError`] only ever
//! triggers a silent reset during rehydration.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

/// Shown when a login fails without a usable server message.
pub const GENERIC_FAILURE: &str = "Something went wrong";
/// Shown when the server accepted a login but the payload was unusable.
pub const LOGIN_FAILED: &str = "Failed to log in, try again later";

const BAD_REQUEST: &str = "Bad Request: Please check the data you have provided.";
const UNAUTHORIZED: &str = "Unauthorized: Please check your credentials.";
const NOT_FOUND: &str = "Not Found: The requested resource could not be found.";
const REGISTER_SERVER_ERROR: &str = "Server Error: Something went wrong on our end. Please try again later.";
const REGISTER_OTHER: &str = "An error occurred. Please try again later.";
const NETWORK_ERROR: &str = "Network Error: Please check your internet connection.";
const PASSWORD_SERVER_ERROR: &str = "An error occurred on the server. Please try again later.";
const PASSWORD_FAILED: &str = "Password update failed. Please try again.";
const SIGN_IN_AGAIN: &str = "Please sign in again.";

/// Error body returned by the REST API on non-2xx responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    /// Human-readable summary, if the server sent one.
    #[serde(default)]
    pub message: Option<String>,
    /// Per-field validation failures (`express-validator` style).
    #[serde(default)]
    pub errors: Option<Vec<FieldError>>,
}

/// A single field validation failure.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub msg: String,
}

impl ErrorBody {
    /// Parse a raw response body, falling back to an empty body.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    fn joined_field_errors(&self) -> Option<String> {
        let errors = self.errors.as_ref().filter(|e| !e.is_empty())?;
        Some(errors.iter().map(|e| e.msg.as_str()).collect::<Vec<_>>().join("\n"))
    }

    fn bad_request_message(&self) -> String {
        self.joined_field_errors()
            .or_else(|| self.message().map(str::to_owned))
            .unwrap_or_else(|| BAD_REQUEST.to_owned())
    }
}

/// Durable token storage could not be written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("token storage unavailable: {0}")]
pub struct StorageError(pub String);

/// Failure talking to the REST API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The server answered with a non-2xx status.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, body: ErrorBody },
    /// The server could not be reached.
    #[error("network error: {0}")]
    Network(String),
    /// No response arrived within the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response: {0}")]
    MalformedResponse(String),
    /// The operation needs a bearer token and none is held.
    #[error("not signed in")]
    NotAuthenticated,
    /// The token could not be persisted after a successful login.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Build a rejection from a status code and the raw response text.
    #[must_use]
    pub fn rejected(status: u16, raw_body: &str) -> Self {
        Self::Rejected { status, body: ErrorBody::parse(raw_body) }
    }

    /// Message surfaced in `Session::error` after a failed login.
    #[must_use]
    pub fn login_message(&self) -> String {
        match self {
            Self::Rejected { body, .. } => body.message().unwrap_or(GENERIC_FAILURE).to_owned(),
            Self::MalformedResponse(_) => LOGIN_FAILED.to_owned(),
            _ => GENERIC_FAILURE.to_owned(),
        }
    }

    /// Message shown on the sign-up form after a failed registration.
    #[must_use]
    pub fn register_message(&self) -> String {
        match self {
            Self::Rejected { status: 400, body } => body.bad_request_message(),
            Self::Rejected { status: 401, .. } => UNAUTHORIZED.to_owned(),
            Self::Rejected { status: 404, .. } => NOT_FOUND.to_owned(),
            Self::Rejected { status: 500, .. } => REGISTER_SERVER_ERROR.to_owned(),
            Self::Rejected { body, .. } => body.message().unwrap_or(REGISTER_OTHER).to_owned(),
            _ => NETWORK_ERROR.to_owned(),
        }
    }

    /// Message shown on the settings form after a failed password change.
    #[must_use]
    pub fn change_password_message(&self) -> String {
        match self {
            Self::Rejected { status: 400, body } => body.bad_request_message(),
            Self::Rejected { status: 500, .. } => PASSWORD_SERVER_ERROR.to_owned(),
            Self::NotAuthenticated => SIGN_IN_AGAIN.to_owned(),
            _ => PASSWORD_FAILED.to_owned(),
        }
    }

    /// Message for a failed marketplace request. `fallback` is used when the
    /// server gave no reason.
    #[must_use]
    pub fn request_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected { status: 400, body } => body
                .joined_field_errors()
                .or_else(|| body.message().map(str::to_owned))
                .unwrap_or_else(|| fallback.to_owned()),
            Self::Rejected { body, .. } => body.message().unwrap_or(fallback).to_owned(),
            Self::Network(_) | Self::Timeout => NETWORK_ERROR.to_owned(),
            Self::NotAuthenticated => SIGN_IN_AGAIN.to_owned(),
            Self::MalformedResponse(_) | Self::Storage(_) => fallback.to_owned(),
        }
    }
}

/// A bearer token whose payload could not be turned into claims.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("token has no payload segment")]
    Malformed,
    #[error("token payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token claims are invalid: {0}")]
    Claims(#[from] serde_json::Error),
}
