//! # Domain Services
//!
//! The business-facing layer over the store engine. Each service owns the
//! validation rules for one collection; none of them bypass the engine to
//! touch records directly.
//!
//! - [`product::ProductService`] - product ledger CRUD + bulk import
//! - [`staff::StaffService`] - staff directory, PIN/email credentials
//! - [`transaction::TransactionService`] - the atomic checkout write path
//! - [`settings::SettingsService`] - typed settings, backup/restore/reset
//! - [`log::LogService`] - append-only audit trail
//! - [`report::ReportService`] - derived views over the transaction ledger

pub mod log;
pub mod product;
pub mod report;
pub mod settings;
pub mod staff;
pub mod transaction;

pub use log::LogService;
pub use product::{ImportOutcome, ProductImport, ProductService};
pub use report::ReportService;
pub use settings::SettingsService;
pub use staff::StaffService;
pub use transaction::TransactionService;
