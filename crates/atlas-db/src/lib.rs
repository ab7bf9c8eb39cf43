//! # atlas-db: Data Layer for Atlas POS
//!
//! This crate provides all persistence for Atlas POS: a generic,
//! collection-oriented store engine over SQLite and the domain services
//! layered on top of it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Atlas POS Data Flow                          │
//! │                                                                     │
//! │  UI collaborators (out of scope)                                    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                    atlas-db (THIS CRATE)                      │  │
//! │  │                                                               │  │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌──────────────┐   │  │
//! │  │   │   services    │   │     Store      │   │    schema    │   │  │
//! │  │   │ ProductService│──►│  (store.rs)    │◄──│  catalog +   │   │  │
//! │  │   │ StaffService  │   │                │   │  DDL         │   │  │
//! │  │   │ Transaction-  │   │ conn state     │   │              │   │  │
//! │  │   │   Service ... │   │ machine, CRUD, │   │ products,    │   │  │
//! │  │   └───────────────┘   │ export/import  │   │ users, ...   │   │  │
//! │  │                       └────────────────┘   └──────────────┘   │  │
//! │  └───────────────────────────────┬───────────────────────────────┘  │
//! │                                  │                                  │
//! │                                  ▼                                  │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                       SQLite Database                         │  │
//! │  │      one table per collection: (pk, record JSON)              │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - the store engine: connection state machine, record CRUD,
//!   indexed lookup, export/import, reset
//! - [`schema`] - the fixed collection catalog and derived DDL
//! - [`services`] - domain services (products, staff, transactions,
//!   settings, logs, reports)
//! - [`ids`] - entity id, receipt number, and salt generation
//! - [`error`] - store and service error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use atlas_db::{Store, StoreConfig};
//! use atlas_db::services::{ProductService, TransactionService};
//!
//! // The composition root owns the store lifecycle.
//! let store = Store::connect(StoreConfig::new("atlas.db")).await?;
//!
//! // Services receive a cloned handle.
//! let products = ProductService::new(store.clone());
//! let transactions = TransactionService::new(store.clone());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ids;
pub mod schema;
pub mod services;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ServiceError, ServiceResult, StoreError, StoreResult};
pub use store::{Store, StoreConfig};

// Service re-exports for convenience
pub use services::{
    ImportOutcome, LogService, ProductService, ReportService, SettingsService, StaffService,
    TransactionService,
};
