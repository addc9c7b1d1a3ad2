use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Point-in-time copy of the aggregate counters, appended to the metrics
/// table by the periodic reporter. Never mutated after capture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsSnapshot {
    pub id: Uuid,
    pub captured_at: String,
    pub total_operations: u64,
    pub operations_by_agent: serde_json::Value,
    pub total_agents: usize,
    pub active_agents: usize,
    pub average_accuracy: f64,
    pub integrations_configured: usize,
}
