//! Unified error types for the user directory.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Reasons a user record (or a lookup key) fails validation.
///
/// These are expected, user-correctable conditions and are surfaced to the
/// caller verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The email is empty after trimming.
    #[error("email is required")]
    EmptyEmail,

    /// The email is not `local@domain` with exactly one `@`.
    #[error("malformed email: {0}")]
    MalformedEmail(String),
}

impl ValidationError {
    /// Name of the field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail | Self::MalformedEmail(_) => "email",
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "EMPTY_EMAIL",
            Self::MalformedEmail(_) => "MALFORMED_EMAIL",
        }
    }
}

/// Error type surfaced by the user service and everything above it.
///
/// Store and cache specific failures never leak through this type: the
/// service maps them onto the stable kinds below.
#[derive(Error, Debug)]
pub enum DirectoryError {
    // ============ Domain Errors ============
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No user matches the requested email
    #[error("User not found")]
    UserNotFound,

    /// The request could not be decoded
    #[error("Bad request: {0}")]
    BadRequest(String),

    // ============ Infrastructure Errors ============
    /// The durable store could not persist a user
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// The durable store could not be read
    #[error("Read failure: {0}")]
    ReadFailure(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DirectoryError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => 400,
            Self::UserNotFound => 404,
            Self::WriteFailure(_)
            | Self::ReadFailure(_)
            | Self::Configuration(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::WriteFailure(_) => "WRITE_FAILURE",
            Self::ReadFailure(_) => "READ_FAILURE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a write failure.
    #[must_use]
    pub fn write_failure<T: Into<String>>(message: T) -> Self {
        Self::WriteFailure(message.into())
    }

    /// Creates a read failure.
    #[must_use]
    pub fn read_failure<T: Into<String>>(message: T) -> Self {
        Self::ReadFailure(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns the validation error, if this is one.
    #[must_use]
    pub const fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }

}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `DirectoryError`.
    ///
    /// Infrastructure failures are reported with a generic message so that
    /// backend details never reach the caller.
    #[must_use]
    pub fn from_error(error: &DirectoryError) -> Self {
        let message = if error.status_code() >= 500 {
            "server error".to_string()
        } else {
            error.to_string()
        };

        let details = error.as_validation().map(|e| {
            vec![FieldError {
                field: e.field().to_string(),
                message: e.to_string(),
                code: e.code().to_string(),
            }]
        });

        Self {
            code: error.error_code().to_string(),
            message,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(DirectoryError::from(ValidationError::EmptyEmail).status_code(), 400);
        assert_eq!(DirectoryError::UserNotFound.status_code(), 404);
        assert_eq!(DirectoryError::BadRequest("eof".to_string()).status_code(), 400);
        assert_eq!(DirectoryError::write_failure("disk").status_code(), 500);
        assert_eq!(DirectoryError::read_failure("net").status_code(), 500);
        assert_eq!(DirectoryError::Configuration("bad".to_string()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DirectoryError::from(ValidationError::MalformedEmail("x".to_string())).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(DirectoryError::UserNotFound.error_code(), "USER_NOT_FOUND");
        assert_eq!(DirectoryError::write_failure("w").error_code(), "WRITE_FAILURE");
        assert_eq!(DirectoryError::read_failure("r").error_code(), "READ_FAILURE");
        assert_eq!(DirectoryError::internal("i").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(ValidationError::EmptyEmail.to_string(), "email is required");
        assert_eq!(
            ValidationError::MalformedEmail("a@b@c".to_string()).to_string(),
            "malformed email: a@b@c"
        );
    }

    #[test]
    fn test_error_response_for_validation_has_details() {
        let err = DirectoryError::from(ValidationError::EmptyEmail);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "VALIDATION_ERROR");
        let details = response.details.expect("validation details");
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].field, "email");
        assert_eq!(details[0].code, "EMPTY_EMAIL");
    }

    #[test]
    fn test_error_response_hides_infrastructure_details() {
        let err = DirectoryError::read_failure("connection refused to 10.0.0.1");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "READ_FAILURE");
        assert_eq!(response.message, "server error");
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_not_found() {
        let response = ErrorResponse::from_error(&DirectoryError::UserNotFound);
        assert_eq!(response.code, "USER_NOT_FOUND");
        assert_eq!(response.message, "User not found");
    }
}
