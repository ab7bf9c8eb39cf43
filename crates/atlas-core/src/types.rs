//! # Domain Types
//!
//! Core domain types for Atlas POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐       │
//! │  │    Product     │   │  Transaction   │   │     User       │       │
//! │  │  ────────────  │   │  ────────────  │   │  ────────────  │       │
//! │  │  id            │   │  id (receipt)  │   │  id            │       │
//! │  │  priceBuy/Sell │   │  items[]       │   │  role          │       │
//! │  │  stock ≥ 0     │   │  totalAmount   │   │  pin | email+  │       │
//! │  │                │   │  change        │   │  passwordHash  │       │
//! │  └────────────────┘   └────────────────┘   └────────────────┘       │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐                            │
//! │  │    Setting     │   │    LogEntry    │                            │
//! │  │  key → value   │   │  append-only   │                            │
//! │  └────────────────┘   └────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Encoding
//! Every record serializes with camelCase field names. That encoding is both
//! the physical record format inside the store engine and the backup snapshot
//! wire format, so an exported document round-trips byte-for-byte through
//! restore.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::GUEST_USER_ID;

// =============================================================================
// Product
// =============================================================================

/// A sellable item in the product ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4). Immutable once created.
    pub id: String,

    /// Display name shown to the cashier and on receipts.
    pub name: String,

    /// Optional category label (e.g. "Beverages").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Purchase cost in the smallest currency unit. Never negative.
    pub price_buy: i64,

    /// Selling price in the smallest currency unit. Never negative.
    pub price_sell: i64,

    /// Current stock level. Never negative after a committed write.
    pub stock: i64,

    /// Optional unit of measure (e.g. "pcs", "kg", "cup").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for creating a product; id and timestamps are assigned by the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub price_buy: i64,
    pub price_sell: i64,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

// =============================================================================
// Staff
// =============================================================================

/// Operator roles.
///
/// `Guest` is a transient, synthetic identity for demo / read-only sessions.
/// It is never written to the staff directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Cashier,
    Guest,
}

/// An operator of the system.
///
/// Exactly one credential scheme is populated per role: cashiers carry a
/// 4-digit `pin`, admins carry `email` + `passwordHash` + `salt`. The
/// plaintext password is never part of this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (UUID v4). Immutable once created.
    pub id: String,

    pub name: String,

    pub role: Role,

    pub created_at: DateTime<Utc>,

    /// Cashier login PIN (exactly 4 digits, unique across cashiers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,

    /// Admin login email, stored lowercased. Unique across admins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Salted SHA-256 digest of the admin password (see [`crate::crypto`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    /// Per-user random salt mixed into `password_hash`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

impl User {
    /// Builds the transient guest identity. Never persisted.
    pub fn guest(now: DateTime<Utc>) -> Self {
        User {
            id: GUEST_USER_ID.to_string(),
            name: "Guest".to_string(),
            role: Role::Guest,
            created_at: now,
            pin: None,
            email: None,
            password_hash: None,
            salt: None,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    #[inline]
    pub fn is_cashier(&self) -> bool {
        self.role == Role::Cashier
    }
}

/// Role-specific credentials supplied when creating a staff member.
///
/// Modeled as an enum so a record with both a PIN and an email, or neither,
/// cannot be expressed at the type level.
#[derive(Debug, Clone)]
pub enum StaffCredentials {
    Admin { email: String, password: String },
    Cashier { pin: String },
}

/// Input for creating a staff member; id and createdAt are assigned by the
/// directory.
#[derive(Debug, Clone)]
pub struct NewStaff {
    pub name: String,
    pub credentials: StaffCredentials,
}

/// Identity snapshot of the operator processing a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cashier {
    pub id: String,
    pub name: String,
}

impl From<&User> for Cashier {
    fn from(user: &User) -> Self {
        Cashier {
            id: user.id.clone(),
            name: user.name.clone(),
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Qris,
}

/// One line of a committed sale.
///
/// Product name and prices are frozen at sale time; later edits to the
/// product never alter this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    /// Unit selling price at sale time.
    pub price: i64,
    /// Unit purchase cost at sale time (for profit reporting).
    pub cost_price: i64,
}

/// An immutable record of one completed sale.
///
/// Once committed, a transaction is never mutated or deleted through normal
/// operation: the transactions collection is an append-only ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Receipt number: date-prefixed with a random suffix, e.g.
    /// `TRX-260807-K3F9QZ`. Roughly chronologically sortable, human readable.
    pub id: String,

    pub items: Vec<TransactionItem>,

    pub total_amount: i64,

    pub total_cost: i64,

    pub payment_method: PaymentMethod,

    /// Amount tendered by the customer.
    pub amount_paid: i64,

    /// `amount_paid - total_amount`. For cash this is never negative.
    pub change: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,

    pub cashier_id: String,

    pub cashier_name: String,
}

/// A sale as assembled at the till, before it is committed.
///
/// The recorder validates the draft against live stock, assigns the receipt
/// id, computes change, and attaches the cashier identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub items: Vec<TransactionItem>,
    pub total_amount: i64,
    pub total_cost: i64,
    pub payment_method: PaymentMethod,
    pub amount_paid: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// =============================================================================
// Setting
// =============================================================================

/// A single named configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub key: String,
    pub value: Value,
}

// =============================================================================
// Audit Log
// =============================================================================

/// Categories of audit entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    /// Privileged operations: backups, restores, resets, emergency access.
    AdminAccess,
    /// Internal system events.
    System,
}

/// An append-only audit record. Never updated or deleted through normal
/// operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,

    pub timestamp: DateTime<Utc>,

    #[serde(rename = "type")]
    pub kind: LogKind,

    pub action: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

// =============================================================================
// Backup Snapshot
// =============================================================================

/// Portable whole-database snapshot produced by backup and consumed by
/// restore.
///
/// Serializes as one flat JSON object: each collection name maps to its
/// record array, plus a `backupDate` timestamp:
///
/// ```json
/// {
///   "products": [...], "transactions": [...], "settings": [...],
///   "users": [...], "logs": [...],
///   "backupDate": "2026-08-07T09:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    /// Collection name → exported records, in their physical JSON encoding.
    #[serde(flatten)]
    pub collections: BTreeMap<String, Vec<Value>>,

    /// When the snapshot was taken. Metadata only; stripped before import.
    #[serde(
        rename = "backupDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub backup_date: Option<DateTime<Utc>>,
}

// =============================================================================
// Reports
// =============================================================================

/// Aggregated sales figures for a reporting period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub revenue: i64,
    pub profit: i64,
    pub transaction_count: u64,
    pub items_sold_count: i64,
}

/// One row of the best-selling-products ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestSeller {
    pub product_id: String,
    pub product_name: String,
    pub quantity_sold: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_json_uses_camel_case_fields() {
        let product = Product {
            id: "p1".into(),
            name: "Iced Tea".into(),
            category: Some("Beverages".into()),
            price_buy: 4000,
            price_sell: 12000,
            stock: 10,
            unit: Some("cup".into()),
            created_at: Utc::now(),
            updated_at: None,
        };

        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("priceBuy").is_some());
        assert!(json.get("priceSell").is_some());
        assert!(json.get("createdAt").is_some());
        // Absent optionals are omitted entirely, matching the backup format.
        assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn role_and_payment_method_serialize_lowercase() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "admin");
        assert_eq!(serde_json::to_value(Role::Cashier).unwrap(), "cashier");
        assert_eq!(serde_json::to_value(PaymentMethod::Qris).unwrap(), "qris");
        assert_eq!(serde_json::to_value(PaymentMethod::Cash).unwrap(), "cash");
    }

    #[test]
    fn log_entry_kind_serializes_as_type_field() {
        let entry = LogEntry {
            id: "l1".into(),
            timestamp: Utc::now(),
            kind: LogKind::AdminAccess,
            action: "Data backup performed.".into(),
            details: None,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "admin_access");
    }

    #[test]
    fn guest_identity_is_synthetic() {
        let guest = User::guest(Utc::now());
        assert_eq!(guest.id, GUEST_USER_ID);
        assert_eq!(guest.role, Role::Guest);
        assert!(guest.pin.is_none());
        assert!(guest.email.is_none());
    }

    #[test]
    fn backup_document_round_trips_backup_date() {
        let mut collections = BTreeMap::new();
        collections.insert("products".to_string(), vec![]);

        let doc = BackupDocument {
            collections,
            backup_date: Some(Utc::now()),
        };

        let json = serde_json::to_string(&doc).unwrap();
        let parsed: BackupDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.backup_date, doc.backup_date);
        assert!(parsed.collections.contains_key("products"));

        // A document without backupDate still parses (older exports).
        let parsed: BackupDocument =
            serde_json::from_str(r#"{"products":[],"transactions":[],"settings":[]}"#).unwrap();
        assert!(parsed.backup_date.is_none());
        assert_eq!(parsed.collections.len(), 3);
    }
}
