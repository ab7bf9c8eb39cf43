//! # Validation Module
//!
//! Input validation for Atlas POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Validation Layers                             │
//! │                                                                     │
//! │  Layer 1: UI collaborators                                          │
//! │  ├── Basic format checks, immediate feedback                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: Domain services                                           │
//! │  └── THIS MODULE: field rules, before any store write               │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Store engine (SQLite)                                     │
//! │  ├── PRIMARY KEY constraints                                        │
//! │  └── UNIQUE index constraints (admin email)                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_NAME_LEN, PIN_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (product or staff member).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NAME_LEN`] characters
///
/// ## Example
/// ```rust
/// use atlas_core::validation::validate_name;
///
/// assert!(validate_name("name", "Iced Tea").is_ok());
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a cashier PIN: exactly four ASCII digits.
pub fn validate_pin(pin: &str) -> ValidationResult<()> {
    if pin.len() != PIN_LENGTH || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "pin".to_string(),
            reason: format!("must be exactly {} digits", PIN_LENGTH),
        });
    }

    Ok(())
}

/// Validates an admin email.
///
/// ## Rules
/// - Must not be empty
/// - Must contain a `@`
///
/// Anything stricter is left to the mail client; the directory only needs a
/// stable, unique lookup key.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if !email.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must contain '@'".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a monetary amount: zero is allowed (free items), negative is not.
pub fn validate_price(field: &str, amount: i64) -> ValidationResult<()> {
    if amount < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level: zero is allowed, negative is not.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// Validates a cart line quantity: strictly positive.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
