//! # Data Layer Error Types
//!
//! Error types for the store engine and the domain services.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Error Propagation                             │
//! │                                                                     │
//! │  SQLite Error (sqlx::Error)                                         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError  ← categorized (DuplicateKey, Unavailable, Query, ...)  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ServiceError ← union with CoreError from atlas-core                │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Caller maps to user-facing messages                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Engine I/O failures are never retried here; they propagate so the caller
//! can re-read the affected collection before continuing.

use thiserror::Error;

use atlas_core::{CoreError, ValidationError};

// =============================================================================
// Store Error
// =============================================================================

/// Store engine failures.
///
/// Wraps sqlx errors and adds engine-level categorization; carries no
/// business knowledge.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying engine cannot serve requests: the store was never
    /// opened, has been closed, or a reset left it in the Failed state.
    ///
    /// Fatal for the session; no operation can proceed without the store.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Primary key or unique secondary index already holds this value.
    #[error("Duplicate key in {collection}: '{key}' already exists")]
    DuplicateKey { collection: String, key: String },

    /// The collection name is not part of the fixed schema.
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// The index name is not declared for this collection.
    #[error("Unknown index {index} on collection {collection}")]
    UnknownIndex { collection: String, index: String },

    /// A record is missing its designated primary key field, or the field is
    /// not a JSON string.
    #[error("Record in {collection} has no usable '{key_path}' key")]
    InvalidRecord {
        collection: String,
        key_path: String,
    },

    /// Record encoding or decoding failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    Query(String),
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// UNIQUE constraint violation  → StoreError::DuplicateKey
/// PoolTimedOut / PoolClosed    → StoreError::Unavailable
/// Other                        → StoreError::Query
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();

                // SQLite reports both primary-key and unique-index conflicts
                // as "UNIQUE constraint failed: <table>.<column>".
                if msg.contains("UNIQUE constraint failed") {
                    let target = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    StoreError::DuplicateKey {
                        collection: target,
                        key: "unknown".to_string(),
                    }
                } else {
                    StoreError::Query(msg)
                }
            }

            sqlx::Error::PoolTimedOut => {
                StoreError::Unavailable("connection pool timed out".to_string())
            }
            sqlx::Error::PoolClosed => StoreError::Unavailable("pool is closed".to_string()),

            other => StoreError::Query(other.to_string()),
        }
    }
}

/// Result type for store engine operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Service Error
// =============================================================================

/// Errors returned by the domain services: a domain rule violation or a
/// store engine failure.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Domain(CoreError::Validation(err))
    }
}

impl ServiceError {
    /// True when the error is a domain rule violation (recoverable at the
    /// call site), false for engine faults.
    pub fn is_domain(&self) -> bool {
        matches!(self, ServiceError::Domain(_))
    }
}

/// Result type for domain service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_messages() {
        let err = StoreError::DuplicateKey {
            collection: "products".to_string(),
            key: "P1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Duplicate key in products: 'P1' already exists"
        );

        let err = StoreError::Unavailable("pool is closed".to_string());
        assert_eq!(err.to_string(), "Storage unavailable: pool is closed");
    }

    #[test]
    fn test_validation_error_converts_through_domain() {
        let err: ServiceError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(err.is_domain());
        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::Validation(_))
        ));
    }
}
