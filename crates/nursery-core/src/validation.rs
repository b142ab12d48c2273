//! # Validation Module
//!
//! Input validation for values that would break the cart if stored.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                    │
//! │  └── Decrement at qty 1 becomes remove, so 0 is never requested        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Shell bridge                                                 │
//! │  └── validate_item_name() before an add reaches the store              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: CartState transitions                                        │
//! │  └── validate_quantity() guards every raw quantity write               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nursery_core::validation::{validate_item_name, validate_quantity};
//!
//! assert!(validate_item_name("Boston Fern").is_ok());
//! assert!(validate_quantity(2).is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;

/// Longest accepted item name, in bytes.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 200 bytes
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a quantity about to be stored.
///
/// ## Rules
/// - Must be at least 1. There is no upper bound.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
            value: qty,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
