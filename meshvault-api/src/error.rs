//! Error Types for the MeshVault API
//!
//! Defines the structured error shape every endpoint returns on failure:
//! an `ErrorCode` category, a human-readable message, and optional
//! details, serialized as JSON with a mapped HTTP status.
//!
//! Lock conflicts and cursor degradations are ordinary outcomes; of the
//! whole taxonomy only `StoreUnavailable` and the validation codes
//! represent actual failures of the caller's request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use meshvault_core::{LockError, StoreError, ValidationError, VaultError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Request validation failed
    ValidationFailed,

    /// Request contains invalid input data
    InvalidInput,

    /// Required field is missing from request
    MissingField,

    /// Field value is out of valid range
    InvalidRange,

    // ========================================================================
    // Not Found Errors (404)
    // ========================================================================
    /// Release/heartbeat referenced a lease that is not the current holder
    LockNotFound,

    // ========================================================================
    // Conflict Errors (409)
    // ========================================================================
    /// Another holder currently owns the lease
    LockConflict,

    /// The lease lapsed before the heartbeat arrived
    LockExpired,

    // ========================================================================
    // Server Errors (500, 503)
    // ========================================================================
    /// Internal server error
    InternalError,

    /// The backing object store is unreachable
    StoreUnavailable,
}

impl ErrorCode {
    /// Map to the HTTP status code returned with this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed
            | ErrorCode::InvalidInput
            | ErrorCode::MissingField
            | ErrorCode::InvalidRange => StatusCode::BAD_REQUEST,

            ErrorCode::LockNotFound => StatusCode::NOT_FOUND,

            ErrorCode::LockConflict | ErrorCode::LockExpired => StatusCode::CONFLICT,

            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Request validation failed",
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::MissingField => "Required field is missing",
            ErrorCode::InvalidRange => "Value is out of valid range",

            ErrorCode::LockNotFound => "No matching lease on this key",

            ErrorCode::LockConflict => "Asset is locked by another client",
            ErrorCode::LockExpired => "Lease has expired; re-acquire the lock",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StoreUnavailable => "Object store temporarily unavailable",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
            details: None,
        }
    }

    /// Add additional details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create a MissingField error.
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingField,
            format!("Required field '{}' is missing", field),
        )
    }

    /// Create an InvalidRange error.
    pub fn invalid_range(field: &str, min: impl fmt::Display, max: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidRange,
            format!("Field '{}' must be between {} and {}", field, min, max),
        )
    }

    /// Create a LockNotFound error.
    pub fn lock_not_found(key: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::LockNotFound,
            format!("No matching lease on '{}'", key),
        )
    }

    /// Create a LockConflict error.
    pub fn lock_conflict(key: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::LockConflict,
            format!("'{}' is locked by another client", key),
        )
    }

    /// Create a LockExpired error.
    pub fn lock_expired(key: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::LockExpired,
            format!("Lease on '{}' has expired; re-acquire the lock", key),
        )
    }

    /// Create a StoreUnavailable error.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreUnavailable, message)
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self)).into_response()
    }
}

// ============================================================================
// DOMAIN ERROR TRANSLATION
// ============================================================================

impl From<VaultError> for ApiError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::Validation(v) => v.into(),
            VaultError::Lock(l) => l.into(),
            VaultError::Store(s) => s.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::RequiredFieldMissing { field } => Self::missing_field(&field),
            ValidationError::InvalidValue { field, reason } => {
                Self::invalid_input(format!("Invalid value for '{}': {}", field, reason))
            }
            ValidationError::InvalidRange { field, min, max } => {
                Self::invalid_range(&field, min, max)
            }
        }
    }
}

impl From<LockError> for ApiError {
    fn from(err: LockError) -> Self {
        match err {
            LockError::NotFound { key } => Self::lock_not_found(key),
            LockError::Expired { key } => Self::lock_expired(key),
            LockError::Store(s) => s.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // A store-rejected continuation token is a caller problem:
            // drop the cursor and restart the enumeration.
            StoreError::InvalidToken { .. } => Self::invalid_input(err.to_string()),
            StoreError::Unavailable { .. } | StoreError::MarkerCreateFailed { .. } => {
                Self::store_unavailable(err.to_string())
            }
        }
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// TESTS
// =============================================================================
