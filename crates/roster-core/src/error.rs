//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Roster.
///
/// The account variants (`EmailExists`, `InvalidCredentials`, `NotFound`,
/// `HashingFailed`, `TokenSigningFailed`, `Persistence`) are the ones the user
/// service returns. `Cache` never leaves the service; it is logged and dropped.
#[derive(Error, Debug)]
pub enum RosterError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Email already registered to another account
    #[error("email already exists")]
    EmailExists,

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Authentication Errors ============
    /// Unknown email or wrong password. The message is identical for both.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Unauthorized access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid or expired token
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Password hashing failure
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Token signing failure
    #[error("Token signing failed: {0}")]
    TokenSigningFailed(String),

    // ============ Infrastructure Errors ============
    /// Store failure
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON encode/decode failure
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RosterError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::EmailExists => 409,
            Self::InvalidCredentials | Self::Unauthorized(_) | Self::InvalidToken(_) => 401,
            Self::HashingFailed(_)
            | Self::TokenSigningFailed(_)
            | Self::Persistence(_)
            | Self::Cache(_)
            | Self::Configuration(_)
            | Self::Serialization(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::EmailExists => "EMAIL_EXISTS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::HashingFailed(_) => "HASHING_FAILED",
            Self::TokenSigningFailed(_) => "TOKEN_SIGNING_FAILED",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a persistence error.
    #[must_use]
    pub fn persistence<T: Into<String>>(message: T) -> Self {
        Self::Persistence(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for RosterError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // email is the only unique column besides the primary key
                if db_err.is_unique_violation() {
                    return Self::EmailExists;
                }
                if let Some(code) = db_err.code() {
                    if code == "23505" || code == "1062" {
                        return Self::EmailExists;
                    }
                }
                Self::Persistence(err.to_string())
            }
            _ => Self::Persistence(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
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
    /// Creates a new error response from a `RosterError`.
    #[must_use]
    pub fn from_error(error: &RosterError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&RosterError> for ErrorResponse {
    fn from(error: &RosterError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(RosterError::not_found("User", 1).status_code(), 404);
        assert_eq!(RosterError::validation("invalid email").status_code(), 400);
        assert_eq!(RosterError::EmailExists.status_code(), 409);
        assert_eq!(RosterError::InvalidCredentials.status_code(), 401);
        assert_eq!(RosterError::unauthorized("missing bearer token").status_code(), 401);
        assert_eq!(RosterError::InvalidToken("bad".to_string()).status_code(), 401);
    }

    #[test]
    fn test_infrastructure_errors_are_server_errors() {
        assert_eq!(RosterError::persistence("db down").status_code(), 500);
        assert_eq!(RosterError::HashingFailed("oom".to_string()).status_code(), 500);
        assert_eq!(RosterError::TokenSigningFailed("key".to_string()).status_code(), 500);
        assert_eq!(RosterError::Cache("refused".to_string()).status_code(), 500);
        assert_eq!(RosterError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(RosterError::not_found("User", 1).error_code(), "NOT_FOUND");
        assert_eq!(RosterError::EmailExists.error_code(), "EMAIL_EXISTS");
        assert_eq!(RosterError::InvalidCredentials.error_code(), "INVALID_CREDENTIALS");
        assert_eq!(RosterError::persistence("x").error_code(), "PERSISTENCE_ERROR");
        assert_eq!(RosterError::internal("x").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        assert_eq!(RosterError::InvalidCredentials.to_string(), "invalid credentials");
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = RosterError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, RosterError::NotFound { .. }));
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_pool_errors_map_to_persistence() {
        let err = RosterError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, RosterError::Persistence(_)));
    }

    #[test]
    fn test_json_errors_map_to_serialization() {
        let json_err = serde_json::from_str::<u64>("not-json").unwrap_err();
        let err = RosterError::from(json_err);
        assert!(matches!(err, RosterError::Serialization(_)));
    }

    #[test]
    fn test_error_response_from_error() {
        let err = RosterError::not_found("User", 1);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(!response.message.is_empty());
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let err = RosterError::validation("bad input");
        let details = vec![FieldError {
            field: "email".to_string(),
            message: "Invalid email".to_string(),
            code: "email".to_string(),
        }];
        let response = ErrorResponse::from(&err).with_details(details);
        assert_eq!(response.details.unwrap().len(), 1);
    }
}
