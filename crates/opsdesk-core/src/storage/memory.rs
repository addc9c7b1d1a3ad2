//! In-memory storage backend for tests and database-less runs.
//!
//! Keeps every accepted record so tests can assert on what the append path
//! actually received. All data is lost on drop.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::integration::IntegrationConfig;
use crate::model::metrics::MetricsSnapshot;
use crate::storage::{OperationRecord, StorageBackend};

#[derive(Default)]
pub struct MemoryStorage {
    operations: Mutex<Vec<OperationRecord>>,
    integrations: Mutex<BTreeMap<String, IntegrationConfig>>,
    snapshots: Mutex<Vec<MetricsSnapshot>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operations(&self) -> Vec<OperationRecord> {
        self.operations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn operations_for(&self, table: &str) -> usize {
        self.operations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|r| r.table() == table)
            .count()
    }

    pub fn integrations(&self) -> BTreeMap<String, IntegrationConfig> {
        self.integrations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn snapshots(&self) -> Vec<MetricsSnapshot> {
        self.snapshots
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn insert_operation(&self, record: &OperationRecord) -> Result<()> {
        self.operations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.clone());
        Ok(())
    }

    async fn upsert_integration(&self, config: &IntegrationConfig) -> Result<()> {
        self.integrations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(config.integration_id.clone(), config.clone());
        Ok(())
    }

    async fn insert_metrics_snapshot(&self, snapshot: &MetricsSnapshot) -> Result<()> {
        self.snapshots
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(snapshot.clone());
        Ok(())
    }
}
