//! # Audit Log
//!
//! Append-only trail of privileged operations (backups, restores, resets,
//! emergency access). Entries are never updated or deleted through normal
//! operation; a factory reset is the only thing that removes them.

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use atlas_core::{LogEntry, LogKind};

use crate::error::ServiceResult;
use crate::ids;
use crate::schema::collections;
use crate::store::Store;

/// The append-only audit log.
#[derive(Debug, Clone)]
pub struct LogService {
    store: Store,
}

impl LogService {
    pub fn new(store: Store) -> Self {
        LogService { store }
    }

    /// Appends one entry, assigning id and timestamp, and returns it.
    pub async fn append(
        &self,
        kind: LogKind,
        action: &str,
        details: Option<Value>,
    ) -> ServiceResult<LogEntry> {
        let entry = LogEntry {
            id: ids::entity_id(),
            timestamp: Utc::now(),
            kind,
            action: action.to_string(),
            details,
        };

        debug!(id = %entry.id, action = %entry.action, "Appending audit entry");
        self.store.insert(collections::LOGS, &entry).await?;

        Ok(entry)
    }

    /// Returns every entry, newest first.
    pub async fn get_all(&self) -> ServiceResult<Vec<LogEntry>> {
        let mut entries: Vec<LogEntry> = self.store.get_all(collections::LOGS).await?;
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
