//! # Collection Schema
//!
//! The fixed catalog of collections the store engine establishes on first
//! open, and the DDL derived from it.
//!
//! ## Physical Encoding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    One table per collection                         │
//! │                                                                     │
//! │  CREATE TABLE products (                                            │
//! │      pk     TEXT NOT NULL PRIMARY KEY,   ← value of record.id       │
//! │      record TEXT NOT NULL                ← canonical JSON           │
//! │  );                                                                 │
//! │                                                                     │
//! │  Secondary indexes are SQLite expression indexes over the JSON:     │
//! │                                                                     │
//! │  CREATE UNIQUE INDEX idx_users_email                                │
//! │      ON users (json_extract(record, '$.email'));                    │
//! │                                                                     │
//! │  json_extract returns NULL for records without the field, and       │
//! │  NULLs never collide in a UNIQUE index, so cashiers (no email)      │
//! │  coexist freely with admins.                                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Table and index names come exclusively from this static catalog; caller
//! strings are only ever looked up against it, never interpolated into SQL.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Collection Names
// =============================================================================

/// Well-known collection names, shared by the engine and the services.
pub mod collections {
    pub const PRODUCTS: &str = "products";
    pub const TRANSACTIONS: &str = "transactions";
    pub const SETTINGS: &str = "settings";
    pub const USERS: &str = "users";
    pub const REPORTS: &str = "reports";
    pub const LOGS: &str = "logs";
}

// =============================================================================
// Catalog Definitions
// =============================================================================

/// A secondary index over one JSON field of a collection's records.
#[derive(Debug, Clone, Copy)]
pub struct IndexDef {
    /// Index name used by `get_by_index` lookups.
    pub name: &'static str,
    /// JSON field the index covers (top-level).
    pub key_path: &'static str,
    /// Unique indexes also reject duplicate inserts.
    pub unique: bool,
}

/// A named collection of same-shaped records.
#[derive(Debug, Clone, Copy)]
pub struct CollectionDef {
    pub name: &'static str,
    /// JSON field holding the primary key of each record.
    pub key_path: &'static str,
    pub indexes: &'static [IndexDef],
}

/// The fixed schema. Established on first open; `reset_all` recreates it
/// empty.
pub const CATALOG: &[CollectionDef] = &[
    CollectionDef {
        name: collections::PRODUCTS,
        key_path: "id",
        indexes: &[IndexDef {
            name: "name",
            key_path: "name",
            unique: false,
        }],
    },
    CollectionDef {
        name: collections::TRANSACTIONS,
        key_path: "id",
        indexes: &[IndexDef {
            name: "createdAt",
            key_path: "createdAt",
            unique: false,
        }],
    },
    CollectionDef {
        name: collections::SETTINGS,
        key_path: "key",
        indexes: &[],
    },
    CollectionDef {
        name: collections::USERS,
        key_path: "id",
        indexes: &[IndexDef {
            name: "email",
            key_path: "email",
            unique: true,
        }],
    },
    CollectionDef {
        name: collections::REPORTS,
        key_path: "id",
        indexes: &[],
    },
    CollectionDef {
        name: collections::LOGS,
        key_path: "id",
        indexes: &[IndexDef {
            name: "timestamp",
            key_path: "timestamp",
            unique: false,
        }],
    },
];

// =============================================================================
// Catalog Lookup
// =============================================================================

/// Resolves a collection by name against the fixed catalog.
pub fn collection(name: &str) -> StoreResult<&'static CollectionDef> {
    CATALOG
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| StoreError::UnknownCollection(name.to_string()))
}

impl CollectionDef {
    /// Resolves a declared index by name.
    pub fn index(&self, index_name: &str) -> StoreResult<&'static IndexDef> {
        self.indexes
            .iter()
            .find(|i| i.name == index_name)
            .ok_or_else(|| StoreError::UnknownIndex {
                collection: self.name.to_string(),
                index: index_name.to_string(),
            })
    }

    fn create_table_sql(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (pk TEXT NOT NULL PRIMARY KEY, record TEXT NOT NULL)",
            self.name
        )
    }

    fn create_index_sql(&self, index: &IndexDef) -> String {
        format!(
            "CREATE {unique}INDEX IF NOT EXISTS idx_{table}_{index} \
             ON {table} (json_extract(record, '$.{field}'))",
            unique = if index.unique { "UNIQUE " } else { "" },
            table = self.name,
            index = index.name,
            field = index.key_path,
        )
    }
}

// =============================================================================
// Schema Application
// =============================================================================

/// Creates every table and index in the catalog. Idempotent: all statements
/// are `IF NOT EXISTS`, so this is safe on every open.
pub async fn apply(pool: &SqlitePool) -> StoreResult<()> {
    for def in CATALOG {
        debug!(collection = def.name, "Ensuring collection schema");

        sqlx::query(&def.create_table_sql()).execute(pool).await?;

        for index in def.indexes {
            sqlx::query(&def.create_index_sql(index))
                .execute(pool)
                .await?;
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        assert!(collection("products").is_ok());
        assert!(collection("settings").is_ok());
        assert!(matches!(
            collection("nope"),
            Err(StoreError::UnknownCollection(_))
        ));
    }

    #[test]
    fn test_settings_keyed_by_key_field() {
        let def = collection("settings").unwrap();
        assert_eq!(def.key_path, "key");
    }

    #[test]
    fn test_index_lookup() {
        let users = collection("users").unwrap();
        let email = users.index("email").unwrap();
        assert!(email.unique);

        assert!(matches!(
            users.index("pin"),
            Err(StoreError::UnknownIndex { .. })
        ));
    }

    #[test]
    fn test_ddl_shapes() {
        let users = collection("users").unwrap();
        assert_eq!(
            users.create_table_sql(),
            "CREATE TABLE IF NOT EXISTS users (pk TEXT NOT NULL PRIMARY KEY, record TEXT NOT NULL)"
        );

        let email = users.index("email").unwrap();
        let sql = users.create_index_sql(email);
        assert!(sql.starts_with("CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email"));
        assert!(sql.contains("json_extract(record, '$.email')"));
    }
}
