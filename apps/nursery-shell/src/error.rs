//! # API Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Shell                              │
//! │                                                                         │
//! │  stdin line                                                             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Not JSON / unknown intent? ─── serde_json::Error ──┐                  │
//! │      │                                               │                  │
//! │      ▼                                               ▼                  │
//! │  Bad name / quantity? ──── ValidationError ───── ApiError ──► reply     │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Success ─────────────────────────────────────────────────► reply      │
//! │                                                                         │
//! │  stdin/stdout broken? ──── ShellError ──► process exits non-zero        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A request error never ends the session: it becomes an error reply and the
//! next line is read. Only I/O failures are fatal.

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use nursery_core::{CoreError, ValidationError};

/// Error returned to the front end in a reply.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "quantity must be positive, got 0"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// The line was not a well-formed request
    InvalidRequest,

    /// Input validation failed
    ValidationError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidRequest, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Malformed request lines.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::invalid_request(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Shell Error
// =============================================================================

/// Fatal errors that end the session.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Reading requests or writing replies failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A reply could not be encoded.
    #[error("Failed to encode reply: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Convenience type alias for shell results.
pub type ShellResult<T> = Result<T, ShellError>;
