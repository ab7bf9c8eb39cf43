//! # Error Types
//!
//! Domain-specific error types for atlas-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  atlas-core errors (this file)                                      │
//! │  ├── CoreError        - Domain rule violations                      │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  atlas-db errors (separate crate)                                   │
//! │  ├── StoreError       - Store engine failures                       │
//! │  └── ServiceError     - Domain ∪ Store, returned by services        │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → ServiceError → caller          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derive macros, not manual impls
//! 2. Context in error messages (product name, available vs requested, ...)
//! 3. Errors are enum variants, never String
//! 4. Checks run before any mutating store call wherever the check does not
//!    itself require a fresh read

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations.
///
/// Every variant is rejected before a write is issued, so a `CoreError`
/// never leaves stored state corrupted.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A cart line references a product id that does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Live stock cannot cover the requested quantity.
    ///
    /// Surfaced to the cashier so the cart can be adjusted; nothing has been
    /// written when this is returned.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Cash tendered below the transaction total.
    #[error("Insufficient payment: total {total}, paid {paid}")]
    InsufficientPayment { total: i64, paid: i64 },

    /// Credential uniqueness violation (cashier PIN or admin email).
    #[error("{field} '{value}' is already in use")]
    DuplicateCredential { field: String, value: String },

    /// Deleting this user would leave the directory with zero admins.
    #[error("Cannot delete the last remaining admin")]
    LastAdminProtected,

    /// A restore document is missing required sections or is not an object.
    ///
    /// Returned before any collection is cleared.
    #[error("Invalid backup format: {0}")]
    InvalidBackupFormat(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input does not meet format requirements; they are
/// surfaced as inline form errors and never reach the store.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be zero or positive.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a PIN that is not 4 digits).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Iced Tea".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Iced Tea: available 3, requested 5"
        );

        let err = CoreError::InsufficientPayment {
            total: 5000,
            paid: 4000,
        };
        assert_eq!(err.to_string(), "Insufficient payment: total 5000, paid 4000");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::InvalidFormat {
            field: "pin".to_string(),
            reason: "must be exactly 4 digits".to_string(),
        };
        assert_eq!(err.to_string(), "pin has invalid format: must be exactly 4 digits");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
