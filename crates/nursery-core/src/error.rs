//! # Error Types
//!
//! Domain-specific error types for nursery-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nursery-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  nursery-shell errors (app)                                            │
//! │  └── ApiError         - What the front end sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Front end              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Most cart mishaps are NOT errors: a malformed cost becomes zero and an
//! operation on a missing item is a no-op. Only a raw quantity below one is
//! rejected, because storing it would break the cart's invariant.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core cart logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when a caller hands the cart a value it must not store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    ///
    /// ## When This Occurs
    /// - `set_quantity("Fern", 0)` through the raw store API
    /// - A front end sending `{"type":"update_quantity","quantity":-1}`
    ///
    /// The decrement intent never produces this: it removes the item instead.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
