//! # Persistent Store Engine
//!
//! Durable, asynchronous, collection-oriented storage with no domain
//! knowledge. Records are stored as canonical JSON, keyed by the field the
//! schema catalog designates for their collection.
//!
//! ## Connection Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   Connection State Machine                          │
//! │                                                                     │
//! │     Store::new(config)                                              │
//! │            │                                                        │
//! │            ▼                                                        │
//! │       ┌─────────┐   open()    ┌─────────┐   connected   ┌───────┐   │
//! │       │Unopened │ ──────────► │ Opening │ ────────────► │ Ready │   │
//! │       └─────────┘             └────┬────┘               └───┬───┘   │
//! │            ▲                       │ connect/schema         │       │
//! │            │ close()               │ error                  │       │
//! │            └───────────────────────┼──────────◄─────────────┘       │
//! │                                    ▼                                │
//! │                               ┌────────┐                            │
//! │                               │ Failed │  ← every operation is      │
//! │                               └────────┘    rejected immediately    │
//! │                                                                     │
//! │  Operations resolve the pool through the current state; anything    │
//! │  other than Ready returns StoreError::Unavailable at once.          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lifecycle (`open` → ready → `close`) is owned by the application
//! composition root; services receive a cloned handle and never manage the
//! connection themselves.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::schema::{self, CollectionDef};

// =============================================================================
// Configuration
// =============================================================================

/// Store engine configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/atlas.db").max_connections(5);
/// let store = Store::connect(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file, or ":memory:" for tests.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    pub min_connections: u32,

    /// Timeout when acquiring a connection.
    pub connect_timeout: Duration,

    /// Idle timeout before closing a pooled connection.
    pub idle_timeout: Duration,
}

impl StoreConfig {
    /// Creates a configuration for a file-backed store. The file is created
    /// on first open if it does not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Creates an in-memory store configuration (for testing).
    ///
    /// The database lives inside a single connection, so the pool is pinned
    /// to one connection that is never recycled.
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(600),
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == ":memory:"
    }

    fn connect_options(&self) -> StoreResult<SqliteConnectOptions> {
        if self.is_in_memory() {
            let options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            Ok(options.foreign_keys(true))
        } else {
            Ok(SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
                // WAL: readers don't block the writer during checkouts
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .foreign_keys(true))
        }
    }
}

// =============================================================================
// Connection State
// =============================================================================

/// Explicit connection state. Operations only proceed in `Ready`; every
/// other state rejects immediately instead of queueing behind an implicit
/// readiness future.
#[derive(Debug)]
enum ConnState {
    Unopened,
    Opening,
    Ready(SqlitePool),
    Failed(String),
}

impl ConnState {
    fn describe(&self) -> &'static str {
        match self {
            ConnState::Unopened => "unopened",
            ConnState::Opening => "opening",
            ConnState::Ready(_) => "ready",
            ConnState::Failed(_) => "failed",
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// Handle to the physical store.
///
/// Cheap to clone; all clones share the same connection state, so a
/// `reset_all` through one handle is observed by every other.
#[derive(Debug, Clone)]
pub struct Store {
    state: Arc<RwLock<ConnState>>,
    config: Arc<StoreConfig>,
}

impl Store {
    /// Creates an unopened store handle. No I/O happens until [`open`].
    ///
    /// [`open`]: Store::open
    pub fn new(config: StoreConfig) -> Self {
        Store {
            state: Arc::new(RwLock::new(ConnState::Unopened)),
            config: Arc::new(config),
        }
    }

    /// One-shot convenience: construct and open.
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        let store = Store::new(config);
        store.open().await?;
        Ok(store)
    }

    /// Establishes the connection and ensures the fixed schema exists.
    ///
    /// Idempotent: opening a Ready store is a no-op. A Failed store may be
    /// re-opened; the previous failure is discarded.
    pub async fn open(&self) -> StoreResult<()> {
        let mut state = self.state.write().await;

        if let ConnState::Ready(_) = *state {
            return Ok(());
        }

        info!(
            path = %self.config.database_path.display(),
            "Opening store"
        );
        *state = ConnState::Opening;

        match self.connect_and_prepare().await {
            Ok(pool) => {
                *state = ConnState::Ready(pool);
                info!("Store ready");
                Ok(())
            }
            Err(err) => {
                let reason = err.to_string();
                warn!(error = %reason, "Store open failed");
                *state = ConnState::Failed(reason.clone());
                Err(StoreError::Unavailable(reason))
            }
        }
    }

    /// Closes the connection pool and returns the handle to Unopened.
    ///
    /// Subsequent operations are rejected until [`open`] is called again.
    ///
    /// [`open`]: Store::open
    pub async fn close(&self) {
        let mut state = self.state.write().await;
        if let ConnState::Ready(pool) = &*state {
            info!("Closing store");
            pool.close().await;
        }
        *state = ConnState::Unopened;
    }

    /// Checks that the store can execute queries.
    pub async fn health_check(&self) -> bool {
        match self.pool().await {
            Ok(pool) => sqlx::query("SELECT 1").execute(&pool).await.is_ok(),
            Err(_) => false,
        }
    }

    async fn connect_and_prepare(&self) -> StoreResult<SqlitePool> {
        let options = self.config.connect_options()?;

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(self.config.max_connections)
            .min_connections(self.config.min_connections)
            .acquire_timeout(self.config.connect_timeout);

        if self.config.is_in_memory() {
            // The sole connection owns the data; recycling it would drop the
            // whole database.
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        } else {
            pool_options = pool_options.idle_timeout(Some(self.config.idle_timeout));
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        schema::apply(&pool).await?;

        Ok(pool)
    }

    /// Resolves the pool through the current connection state.
    async fn pool(&self) -> StoreResult<SqlitePool> {
        let state = self.state.read().await;
        match &*state {
            ConnState::Ready(pool) => Ok(pool.clone()),
            ConnState::Failed(reason) => Err(StoreError::Unavailable(reason.clone())),
            other => Err(StoreError::Unavailable(format!(
                "store is {}",
                other.describe()
            ))),
        }
    }

    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Returns every record in a collection. Order is unspecified; callers
    /// sort.
    pub async fn get_all<T: DeserializeOwned>(&self, collection: &str) -> StoreResult<Vec<T>> {
        let def = schema::collection(collection)?;
        let pool = self.pool().await?;

        let rows: Vec<String> =
            sqlx::query_scalar(&format!("SELECT record FROM {}", def.name))
                .fetch_all(&pool)
                .await?;

        rows.iter()
            .map(|record| serde_json::from_str(record).map_err(StoreError::from))
            .collect()
    }

    /// Returns the record with the given primary key, if any.
    pub async fn get_by_id<T: DeserializeOwned>(
        &self,
        collection: &str,
        key: &str,
    ) -> StoreResult<Option<T>> {
        let def = schema::collection(collection)?;
        let pool = self.pool().await?;

        let row: Option<String> =
            sqlx::query_scalar(&format!("SELECT record FROM {} WHERE pk = ?1", def.name))
                .bind(key)
                .fetch_optional(&pool)
                .await?;

        row.map(|record| serde_json::from_str(&record).map_err(StoreError::from))
            .transpose()
    }

    /// Single-result secondary lookup over a declared index.
    ///
    /// Intended for unique indexes (e.g. `users.email`); on a non-unique
    /// index an arbitrary matching record is returned.
    pub async fn get_by_index<T: DeserializeOwned>(
        &self,
        collection: &str,
        index: &str,
        value: &str,
    ) -> StoreResult<Option<T>> {
        let def = schema::collection(collection)?;
        let idx = def.index(index)?;
        let pool = self.pool().await?;

        let sql = format!(
            "SELECT record FROM {} WHERE json_extract(record, '$.{}') = ?1 LIMIT 1",
            def.name, idx.key_path
        );

        let row: Option<String> = sqlx::query_scalar(&sql)
            .bind(value)
            .fetch_optional(&pool)
            .await?;

        row.map(|record| serde_json::from_str(&record).map_err(StoreError::from))
            .transpose()
    }

    /// Inserts a new record. Fails with [`StoreError::DuplicateKey`] if the
    /// primary key or a unique index already holds the value.
    pub async fn insert<T: Serialize>(&self, collection: &str, record: &T) -> StoreResult<()> {
        let def = schema::collection(collection)?;
        let pool = self.pool().await?;

        let json = serde_json::to_value(record)?;
        let key = extract_key(def, &json)?;

        debug!(collection = def.name, key = %key, "Inserting record");

        sqlx::query(&format!(
            "INSERT INTO {} (pk, record) VALUES (?1, ?2)",
            def.name
        ))
        .bind(&key)
        .bind(json.to_string())
        .execute(&pool)
        .await
        .map_err(|e| duplicate_as(def, &key, e))?;

        Ok(())
    }

    /// Inserts or replaces the record with the same primary key.
    pub async fn upsert<T: Serialize>(&self, collection: &str, record: &T) -> StoreResult<()> {
        let def = schema::collection(collection)?;
        let pool = self.pool().await?;

        let json = serde_json::to_value(record)?;
        let key = extract_key(def, &json)?;

        debug!(collection = def.name, key = %key, "Upserting record");

        sqlx::query(&format!(
            "INSERT INTO {} (pk, record) VALUES (?1, ?2) \
             ON CONFLICT(pk) DO UPDATE SET record = excluded.record",
            def.name
        ))
        .bind(&key)
        .bind(json.to_string())
        .execute(&pool)
        .await
        // A unique secondary index (users.email) can still collide with a
        // different primary key.
        .map_err(|e| duplicate_as(def, &key, e))?;

        Ok(())
    }

    /// Deletes the record with the given primary key. Deleting a missing key
    /// is a no-op.
    pub async fn delete_by_id(&self, collection: &str, key: &str) -> StoreResult<()> {
        let def = schema::collection(collection)?;
        let pool = self.pool().await?;

        debug!(collection = def.name, key = %key, "Deleting record");

        sqlx::query(&format!("DELETE FROM {} WHERE pk = ?1", def.name))
            .bind(key)
            .execute(&pool)
            .await?;

        Ok(())
    }

    /// Removes all records in one collection.
    pub async fn clear(&self, collection: &str) -> StoreResult<()> {
        let def = schema::collection(collection)?;
        let pool = self.pool().await?;

        debug!(collection = def.name, "Clearing collection");

        sqlx::query(&format!("DELETE FROM {}", def.name))
            .execute(&pool)
            .await?;

        Ok(())
    }

    // =========================================================================
    // Snapshot Operations
    // =========================================================================

    /// Exports every collection as raw JSON records.
    pub async fn export_all(&self) -> StoreResult<BTreeMap<String, Vec<Value>>> {
        let mut snapshot = BTreeMap::new();

        for def in schema::CATALOG {
            let records: Vec<Value> = self.get_all(def.name).await?;
            snapshot.insert(def.name.to_string(), records);
        }

        Ok(snapshot)
    }

    /// Replaces the contents of every collection present in the snapshot;
    /// collections omitted from the snapshot are left untouched.
    ///
    /// Collection names are validated against the catalog BEFORE anything is
    /// cleared. Each collection is replaced inside one SQL transaction
    /// (clear + bulk insert), but there is no transaction across
    /// collections: a crash mid-import can leave a mixed-generation
    /// database. Callers gate this behind explicit confirmation.
    pub async fn import_all(&self, snapshot: &BTreeMap<String, Vec<Value>>) -> StoreResult<()> {
        for name in snapshot.keys() {
            schema::collection(name)?;
        }

        let pool = self.pool().await?;

        for (name, records) in snapshot {
            let def = schema::collection(name)?;

            info!(collection = def.name, count = records.len(), "Importing collection");

            let mut tx = pool.begin().await?;

            sqlx::query(&format!("DELETE FROM {}", def.name))
                .execute(&mut *tx)
                .await?;

            for record in records {
                let key = extract_key(def, record)?;
                sqlx::query(&format!(
                    "INSERT INTO {} (pk, record) VALUES (?1, ?2)",
                    def.name
                ))
                .bind(&key)
                .bind(record.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| duplicate_as(def, &key, e))?;
            }

            tx.commit().await?;
        }

        Ok(())
    }

    /// Destroys the physical database and recreates the empty schema.
    ///
    /// On failure the store transitions to Failed and all subsequent
    /// operations are rejected until a successful [`open`].
    ///
    /// [`open`]: Store::open
    pub async fn reset_all(&self) -> StoreResult<()> {
        let mut state = self.state.write().await;

        warn!(
            path = %self.config.database_path.display(),
            "Resetting store: all local data will be destroyed"
        );

        if let ConnState::Ready(pool) = &*state {
            pool.close().await;
        }
        *state = ConnState::Opening;

        if !self.config.is_in_memory() {
            if let Err(err) = self.remove_database_files().await {
                let reason = err.to_string();
                *state = ConnState::Failed(reason.clone());
                return Err(StoreError::Unavailable(reason));
            }
        }
        // In-memory databases die with their connection; closing the pool
        // above already destroyed the data.

        match self.connect_and_prepare().await {
            Ok(pool) => {
                *state = ConnState::Ready(pool);
                info!("Store recreated with empty schema");
                Ok(())
            }
            Err(err) => {
                let reason = err.to_string();
                *state = ConnState::Failed(reason.clone());
                Err(StoreError::Unavailable(reason))
            }
        }
    }

    async fn remove_database_files(&self) -> std::io::Result<()> {
        let base = self.config.database_path.display().to_string();

        for suffix in ["", "-wal", "-shm"] {
            let path = format!("{}{}", base, suffix);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Pulls the primary key out of a serialized record.
fn extract_key(def: &CollectionDef, record: &Value) -> StoreResult<String> {
    record
        .get(def.key_path)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| StoreError::InvalidRecord {
            collection: def.name.to_string(),
            key_path: def.key_path.to_string(),
        })
}

/// Maps a sqlx error, attaching collection/key context to duplicate-key
/// conflicts.
fn duplicate_as(def: &CollectionDef, key: &str, err: sqlx::Error) -> StoreError {
    match StoreError::from(err) {
        StoreError::DuplicateKey { .. } => StoreError::DuplicateKey {
            collection: def.name.to_string(),
            key: key.to_string(),
        },
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::collections;
    use serde_json::json;

    async fn open_store() -> Store {
        Store::connect(StoreConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_open_and_health_check() {
        let store = open_store().await;
        assert!(store.health_check().await);
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = open_store().await;

        let record = json!({"id": "P1", "name": "Iced Tea", "stock": 5});
        store.insert(collections::PRODUCTS, &record).await.unwrap();

        let loaded: Option<Value> = store.get_by_id(collections::PRODUCTS, "P1").await.unwrap();
        assert_eq!(loaded.unwrap(), record);

        let all: Vec<Value> = store.get_all(collections::PRODUCTS).await.unwrap();
        assert_eq!(all.len(), 1);

        let missing: Option<Value> = store.get_by_id(collections::PRODUCTS, "P2").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_key_rejected() {
        let store = open_store().await;

        let record = json!({"id": "P1", "name": "Iced Tea"});
        store.insert(collections::PRODUCTS, &record).await.unwrap();

        let err = store
            .insert(collections::PRODUCTS, &record)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
    }

    #[tokio::test]
    async fn test_upsert_replaces() {
        let store = open_store().await;

        store
            .insert(collections::PRODUCTS, &json!({"id": "P1", "stock": 5}))
            .await
            .unwrap();
        store
            .upsert(collections::PRODUCTS, &json!({"id": "P1", "stock": 3}))
            .await
            .unwrap();

        let loaded: Value = store
            .get_by_id(collections::PRODUCTS, "P1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded["stock"], 3);

        let all: Vec<Value> = store.get_all(collections::PRODUCTS).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_unique_email_index() {
        let store = open_store().await;

        store
            .insert(
                collections::USERS,
                &json!({"id": "U1", "email": "a@shop.example"}),
            )
            .await
            .unwrap();

        // Same email under a different primary key is rejected.
        let err = store
            .insert(
                collections::USERS,
                &json!({"id": "U2", "email": "a@shop.example"}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));

        // Records without the indexed field don't collide with each other.
        store
            .insert(collections::USERS, &json!({"id": "U3", "pin": "1111"}))
            .await
            .unwrap();
        store
            .insert(collections::USERS, &json!({"id": "U4", "pin": "2222"}))
            .await
            .unwrap();

        let found: Option<Value> = store
            .get_by_index(collections::USERS, "email", "a@shop.example")
            .await
            .unwrap();
        assert_eq!(found.unwrap()["id"], "U1");

        let missing: Option<Value> = store
            .get_by_index(collections::USERS, "email", "b@shop.example")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = open_store().await;

        store
            .insert(collections::PRODUCTS, &json!({"id": "P1"}))
            .await
            .unwrap();
        store.delete_by_id(collections::PRODUCTS, "P1").await.unwrap();
        // Second delete of the same key succeeds silently.
        store.delete_by_id(collections::PRODUCTS, "P1").await.unwrap();

        let all: Vec<Value> = store.get_all(collections::PRODUCTS).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_clear_collection() {
        let store = open_store().await;

        for i in 0..3 {
            store
                .insert(collections::LOGS, &json!({"id": format!("L{i}")}))
                .await
                .unwrap();
        }
        store.clear(collections::LOGS).await.unwrap();

        let all: Vec<Value> = store.get_all(collections::LOGS).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_export_import_round_trip() {
        let store = open_store().await;

        store
            .insert(collections::PRODUCTS, &json!({"id": "P1", "stock": 5}))
            .await
            .unwrap();
        store
            .insert(collections::SETTINGS, &json!({"key": "shop_name", "value": "Atlas"}))
            .await
            .unwrap();

        let snapshot = store.export_all().await.unwrap();
        assert_eq!(snapshot.len(), schema::CATALOG.len());
        assert_eq!(snapshot["products"].len(), 1);

        // Mutate, then restore the snapshot.
        store.clear(collections::PRODUCTS).await.unwrap();
        store
            .insert(collections::USERS, &json!({"id": "U1"}))
            .await
            .unwrap();

        store.import_all(&snapshot).await.unwrap();

        let products: Vec<Value> = store.get_all(collections::PRODUCTS).await.unwrap();
        assert_eq!(products.len(), 1);
        // The snapshot contained an empty users collection, so the stray
        // record is gone again.
        let users: Vec<Value> = store.get_all(collections::USERS).await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn test_import_leaves_omitted_collections_untouched() {
        let store = open_store().await;

        store
            .insert(collections::USERS, &json!({"id": "U1"}))
            .await
            .unwrap();

        let mut snapshot = BTreeMap::new();
        snapshot.insert(
            collections::PRODUCTS.to_string(),
            vec![json!({"id": "P1"})],
        );
        store.import_all(&snapshot).await.unwrap();

        let users: Vec<Value> = store.get_all(collections::USERS).await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_import_rejects_unknown_collection_before_clearing() {
        let store = open_store().await;

        store
            .insert(collections::PRODUCTS, &json!({"id": "P1"}))
            .await
            .unwrap();

        let mut snapshot = BTreeMap::new();
        snapshot.insert(collections::PRODUCTS.to_string(), vec![]);
        snapshot.insert("bogus".to_string(), vec![]);

        let err = store.import_all(&snapshot).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownCollection(_)));

        // Nothing was cleared.
        let products: Vec<Value> = store.get_all(collections::PRODUCTS).await.unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_import_rejects_record_without_key() {
        let store = open_store().await;

        let mut snapshot = BTreeMap::new();
        snapshot.insert(
            collections::PRODUCTS.to_string(),
            vec![json!({"name": "no id"})],
        );

        let err = store.import_all(&snapshot).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord { .. }));
    }

    #[tokio::test]
    async fn test_reset_all_recreates_empty_schema() {
        let store = open_store().await;

        store
            .insert(collections::PRODUCTS, &json!({"id": "P1"}))
            .await
            .unwrap();
        store
            .insert(collections::TRANSACTIONS, &json!({"id": "T1"}))
            .await
            .unwrap();

        store.reset_all().await.unwrap();

        let products: Vec<Value> = store.get_all(collections::PRODUCTS).await.unwrap();
        let transactions: Vec<Value> = store.get_all(collections::TRANSACTIONS).await.unwrap();
        assert!(products.is_empty());
        assert!(transactions.is_empty());

        // The store stays usable after a reset.
        store
            .insert(collections::PRODUCTS, &json!({"id": "P2"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_operations_rejected_after_close() {
        let store = open_store().await;
        store.close().await;

        let err = store
            .get_all::<Value>(collections::PRODUCTS)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));

        // Re-opening brings it back.
        store.open().await.unwrap();
        assert!(store.health_check().await);
    }

    #[tokio::test]
    async fn test_unopened_store_rejects_operations() {
        let store = Store::new(StoreConfig::in_memory());

        let err = store
            .get_all::<Value>(collections::PRODUCTS)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_unknown_collection_rejected() {
        let store = open_store().await;

        let err = store.get_all::<Value>("bogus").await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownCollection(_)));
    }
}
