//! Fire-and-forget operation logging.
//!
//! Handlers enqueue a record and return; a single drain task performs the
//! inserts in arrival order. Persistence is telemetry here, not the source
//! of truth for responses, so a failed insert is logged and dropped and can
//! never affect an API response that was already computed.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::storage::{OperationRecord, StorageBackend};

pub struct OperationRecorder {
    tx: mpsc::UnboundedSender<OperationRecord>,
}

impl OperationRecorder {
    /// Start the drain task against the given backend.
    pub fn spawn(storage: Arc<dyn StorageBackend>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<OperationRecord>();
        tokio::spawn(async move {
            while let Some(record) = rx.recv().await {
                if let Err(e) = storage.insert_operation(&record).await {
                    tracing::warn!("failed to log {} record: {e}", record.table());
                }
            }
        });
        Self { tx }
    }

    /// Enqueue a record. Never blocks and never fails the caller.
    pub fn record(&self, record: OperationRecord) {
        if self.tx.send(record).is_err() {
            tracing::warn!("operation recorder closed, dropping record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FinancialOperationRow;
    use crate::storage::memory::MemoryStorage;
    use serde_json::json;
    use std::time::Duration;

    fn sample_record(n: u32) -> OperationRecord {
        OperationRecord::Financial(FinancialOperationRow {
            operation_id: format!("fin_{n}"),
            operation_type: "expense_report".to_string(),
            status: "completed".to_string(),
            amount: Some(250.0),
            category: None,
            processed_by: "financial_operations".to_string(),
            accuracy_confidence: 0.999,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            metadata: json!({}),
        })
    }

    #[tokio::test]
    async fn test_records_reach_storage_in_order() {
        let storage = Arc::new(MemoryStorage::new());
        let recorder = OperationRecorder::spawn(storage.clone());

        recorder.record(sample_record(1));
        recorder.record(sample_record(2));

        // The drain task runs concurrently; poll briefly for delivery.
        for _ in 0..50 {
            if storage.operations().len() == 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let ids: Vec<String> = storage
            .operations()
            .iter()
            .map(|r| match r {
                OperationRecord::Financial(row) => row.operation_id.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(ids, vec!["fin_1", "fin_2"]);
    }

    #[tokio::test]
    async fn test_record_does_not_fail_on_storage_errors() {
        let storage = Arc::new(crate::storage::UnconfiguredStorage::new("OPSDESK_DATABASE_URL"));
        let recorder = OperationRecorder::spawn(storage);

        // Both calls succeed from the caller's perspective.
        recorder.record(sample_record(1));
        recorder.record(sample_record(2));
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
