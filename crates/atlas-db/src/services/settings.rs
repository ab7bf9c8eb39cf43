//! # Settings & Backup Coordinator
//!
//! Typed key-value settings over the `settings` collection, plus the
//! whole-database export/import/reset orchestration.
//!
//! ## Backup / Restore Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  backup()                       restore(document)                   │
//! │  ─────────                      ─────────────────                   │
//! │  export_all()                   required sections present?          │
//! │      │                              │ no → InvalidBackupFormat      │
//! │      ▼                              ▼      (nothing cleared)        │
//! │  wrap with backupDate           strip backupDate                    │
//! │      │                              │                               │
//! │      ▼                              ▼                               │
//! │  refresh last_backup_date       import_all() ← per-collection       │
//! │      │                              │           clear + bulk insert │
//! │      ▼                              ▼                               │
//! │  audit log entry                audit log entry                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `restore` and `reset_all` are destructive, wide-blast-radius operations;
//! callers gate them behind explicit user confirmation.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use atlas_core::{BackupDocument, CoreError, LogKind, Setting};

use crate::error::{ServiceResult, StoreError};
use crate::schema::collections;
use crate::services::log::LogService;
use crate::store::Store;

/// Well-known setting keys.
pub mod keys {
    /// SHA-256 hex digest of the emergency-access code.
    pub const ADMIN_CODE_HASH: &str = "admin_code_hash";
    /// Timestamp of the most recent successful backup.
    pub const LAST_BACKUP_DATE: &str = "last_backup_date";
}

/// Sections a restore document must contain.
const REQUIRED_SECTIONS: &[&str] = &[
    collections::PRODUCTS,
    collections::TRANSACTIONS,
    collections::SETTINGS,
];

/// The settings store and backup coordinator.
#[derive(Debug, Clone)]
pub struct SettingsService {
    store: Store,
    logs: LogService,
}

impl SettingsService {
    pub fn new(store: Store) -> Self {
        let logs = LogService::new(store.clone());
        SettingsService { store, logs }
    }

    // =========================================================================
    // Typed Settings
    // =========================================================================

    /// Reads a setting and deserializes its value.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> ServiceResult<Option<T>> {
        let setting: Option<Setting> = self.store.get_by_id(collections::SETTINGS, key).await?;

        setting
            .map(|s| serde_json::from_value(s.value).map_err(StoreError::from))
            .transpose()
            .map_err(Into::into)
    }

    /// Writes a setting, replacing any previous value under the key.
    pub async fn set<T: Serialize>(&self, key: &str, value: T) -> ServiceResult<()> {
        let setting = Setting {
            key: key.to_string(),
            value: serde_json::to_value(value).map_err(StoreError::from)?,
        };

        Ok(self.store.upsert(collections::SETTINGS, &setting).await?)
    }

    // =========================================================================
    // Backup / Restore / Reset
    // =========================================================================

    /// Takes a whole-database snapshot and wraps it as a portable document.
    ///
    /// Also refreshes the `last_backup_date` setting (outside the snapshot,
    /// so the exported document describes the pre-backup state).
    pub async fn backup(&self) -> ServiceResult<BackupDocument> {
        let snapshot = self.store.export_all().await?;
        let now = Utc::now();

        let document = BackupDocument {
            collections: snapshot,
            backup_date: Some(now),
        };

        self.set(keys::LAST_BACKUP_DATE, now).await?;
        self.audit("Data backup performed.").await;

        info!(
            collections = document.collections.len(),
            "Backup document produced"
        );
        Ok(document)
    }

    /// Replaces stored state with the snapshot document.
    ///
    /// A document missing any of the required sections (`products`,
    /// `transactions`, `settings`) is rejected with `InvalidBackupFormat`
    /// before anything is cleared. Sections present in the document fully
    /// replace their collection; omitted sections are left untouched.
    pub async fn restore(&self, document: BackupDocument) -> ServiceResult<()> {
        for section in REQUIRED_SECTIONS {
            if !document.collections.contains_key(*section) {
                return Err(CoreError::InvalidBackupFormat(format!(
                    "missing required section '{}'",
                    section
                ))
                .into());
            }
        }

        // backupDate lives outside `collections`; nothing to strip here.
        self.store.import_all(&document.collections).await?;

        self.audit("Data restore performed.").await;
        info!("Restore complete");
        Ok(())
    }

    /// Factory reset: destroys and recreates the entire store.
    ///
    /// The audit entry is written after recreation so it survives in the
    /// fresh database.
    pub async fn reset_all(&self) -> ServiceResult<()> {
        self.store.reset_all().await?;
        self.audit("Database factory reset performed.").await;
        Ok(())
    }

    /// Audit logging must never break the operation it annotates.
    async fn audit(&self, action: &str) {
        if let Err(err) = self.logs.append(LogKind::AdminAccess, action, None).await {
            warn!(error = %err, action, "Failed to write audit entry");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::services::product::ProductService;
    use crate::services::staff::StaffService;
    use crate::store::StoreConfig;
    use atlas_core::{NewProduct, NewStaff, StaffCredentials};
    use serde::Deserialize;
    use std::collections::BTreeMap;

    async fn open_store() -> Store {
        Store::connect(StoreConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_typed_get_set() {
        let settings = SettingsService::new(open_store().await);

        assert!(settings.get::<String>("shop_name").await.unwrap().is_none());

        settings.set("shop_name", "Atlas Corner").await.unwrap();
        assert_eq!(
            settings.get::<String>("shop_name").await.unwrap().unwrap(),
            "Atlas Corner"
        );

        // Overwrite under the same key.
        settings.set("shop_name", "Atlas Two").await.unwrap();
        assert_eq!(
            settings.get::<String>("shop_name").await.unwrap().unwrap(),
            "Atlas Two"
        );

        // Structured values round-trip through serde.
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Receipt {
            footer: String,
            show_logo: bool,
        }
        let receipt = Receipt {
            footer: "Thank you!".to_string(),
            show_logo: true,
        };
        settings.set("receipt", &receipt).await.unwrap();
        assert_eq!(
            settings.get::<Receipt>("receipt").await.unwrap().unwrap(),
            receipt
        );
    }

    #[tokio::test]
    async fn test_backup_reset_restore_round_trip() {
        let store = open_store().await;
        let products = ProductService::new(store.clone());
        let staff = StaffService::new(store.clone());
        let settings = SettingsService::new(store.clone());

        products
            .add(NewProduct {
                name: "Iced Tea".to_string(),
                category: None,
                price_buy: 4000,
                price_sell: 12000,
                stock: 10,
                unit: None,
            })
            .await
            .unwrap();
        staff
            .add(NewStaff {
                name: "Ayu".to_string(),
                credentials: StaffCredentials::Cashier {
                    pin: "1234".to_string(),
                },
            })
            .await
            .unwrap();
        settings.set("shop_name", "Atlas Corner").await.unwrap();

        let document = settings.backup().await.unwrap();
        assert!(document.backup_date.is_some());
        assert_eq!(document.collections["products"].len(), 1);
        assert_eq!(document.collections["users"].len(), 1);

        // Serialize to JSON and back, as a real download/upload would.
        let wire = serde_json::to_string(&document).unwrap();
        let document: BackupDocument = serde_json::from_str(&wire).unwrap();

        settings.reset_all().await.unwrap();
        assert!(products.get_all().await.unwrap().is_empty());

        settings.restore(document).await.unwrap();

        let restored = products.get_all().await.unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].name, "Iced Tea");

        let cashier = staff.login_with_pin("1234").await.unwrap();
        assert!(cashier.is_some());

        assert_eq!(
            settings.get::<String>("shop_name").await.unwrap().unwrap(),
            "Atlas Corner"
        );
    }

    #[tokio::test]
    async fn test_restore_rejects_malformed_document() {
        let store = open_store().await;
        let products = ProductService::new(store.clone());
        let settings = SettingsService::new(store.clone());

        products
            .add(NewProduct {
                name: "Iced Tea".to_string(),
                category: None,
                price_buy: 0,
                price_sell: 100,
                stock: 1,
                unit: None,
            })
            .await
            .unwrap();

        // Empty document: no required sections at all.
        let err = settings
            .restore(BackupDocument {
                collections: BTreeMap::new(),
                backup_date: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::InvalidBackupFormat(_))
        ));

        // Partially-populated document: still missing `settings`.
        let mut collections_map = BTreeMap::new();
        collections_map.insert("products".to_string(), vec![]);
        collections_map.insert("transactions".to_string(), vec![]);
        let err = settings
            .restore(BackupDocument {
                collections: collections_map,
                backup_date: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::InvalidBackupFormat(_))
        ));

        // Existing data untouched in both cases.
        assert_eq!(products.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_backup_refreshes_last_backup_date() {
        let settings = SettingsService::new(open_store().await);

        assert!(settings
            .get::<String>(keys::LAST_BACKUP_DATE)
            .await
            .unwrap()
            .is_none());

        settings.backup().await.unwrap();

        assert!(settings
            .get::<chrono::DateTime<Utc>>(keys::LAST_BACKUP_DATE)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_destructive_operations_are_audited() {
        let store = open_store().await;
        let settings = SettingsService::new(store.clone());
        let logs = LogService::new(store.clone());

        settings.backup().await.unwrap();
        settings.reset_all().await.unwrap();

        let entries = logs.get_all().await.unwrap();
        // The reset wiped the backup entry; the reset entry itself survives
        // because it is written after recreation.
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "Database factory reset performed.");
        assert_eq!(entries[0].kind, LogKind::AdminAccess);
    }
}
