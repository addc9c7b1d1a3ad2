//! Periodic metrics reporter.
//!
//! One background task on a fixed cadence, no jitter, no persisted schedule:
//! a restart resets the clock. Each tick snapshots the aggregate counters
//! and appends them to the metrics table; failures are logged and the loop
//! keeps going.

use std::sync::Arc;
use std::time::Duration;

use crate::ops::OpsdeskEngine;

pub fn spawn(engine: Arc<OpsdeskEngine>, interval: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            let snapshot = engine.metrics_snapshot();
            match engine.storage.insert_metrics_snapshot(&snapshot).await {
                Ok(()) => tracing::debug!(
                    total_operations = snapshot.total_operations,
                    "metrics snapshot recorded"
                ),
                Err(e) => tracing::warn!("failed to record metrics snapshot: {e}"),
            }
        }
    })
}
