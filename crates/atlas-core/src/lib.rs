//! # atlas-core: Pure Domain Logic for Atlas POS
//!
//! This crate is the heart of Atlas POS. It contains the domain model and all
//! business rules as pure code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Atlas POS Architecture                        │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │              UI collaborators (out of scope)                  │  │
//! │  │    Cashier screen ──► Products ──► Reports ──► Settings       │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │                 atlas-db (domain services)                    │  │
//! │  │   ProductService · StaffService · TransactionService · ...    │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │               ★ atlas-core (THIS CRATE) ★                     │  │
//! │  │                                                               │  │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌──────────┐   │  │
//! │  │   │   types   │  │validation │  │  crypto   │  │  error   │   │  │
//! │  │   │  Product  │  │   rules   │  │  SHA-256  │  │ CoreError│   │  │
//! │  │   │   User    │  │  checks   │  │  digests  │  │Validation│   │  │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └──────────┘   │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                           │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, User, Transaction, Setting, LogEntry)
//! - [`validation`] - Business rule validation
//! - [`crypto`] - SHA-256 digest primitives for credentials
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Integer money**: all monetary values are `i64` in the smallest
//!    currency unit. No floating point.
//! 2. **Explicit errors**: all errors are typed, never strings or panics.
//! 3. **Snapshot records**: a committed transaction freezes product data at
//!    sale time; later product edits never alter history.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod crypto;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Synthetic id used for the transient guest identity.
///
/// A guest session is never written to the staff directory; this fixed id
/// marks transactions and audit entries produced while browsing in demo /
/// read-only mode.
pub const GUEST_USER_ID: &str = "GUEST_SESSION";

/// Cashier PINs are exactly this many ASCII digits.
pub const PIN_LENGTH: usize = 4;

/// Maximum length accepted for product and staff names.
pub const MAX_NAME_LEN: usize = 200;
