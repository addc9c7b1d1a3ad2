pub mod analytics;
pub mod financial;
pub mod health;
pub mod hr;
pub mod integration;
pub mod status;
pub mod support;

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::model::integration::IntegrationConfig;
use crate::model::metrics::MetricsSnapshot;
use crate::recorder::OperationRecorder;
use crate::registry::AgentRegistry;
use crate::storage::StorageBackend;

/// All mutable service state, owned in one place and handed to the HTTP
/// layer as shared state. Counters and the integration map live here for
/// the process lifetime; the store only ever receives copies.
pub struct OpsdeskEngine {
    pub storage: Arc<dyn StorageBackend>,
    pub registry: AgentRegistry,
    pub recorder: OperationRecorder,
    pub integrations: RwLock<BTreeMap<String, IntegrationConfig>>,
    pub started_at: DateTime<Utc>,
    pub last_health_check: RwLock<Option<DateTime<Utc>>>,
}

impl OpsdeskEngine {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        let recorder = OperationRecorder::spawn(storage.clone());
        Self {
            storage,
            registry: AgentRegistry::new(),
            recorder,
            integrations: RwLock::new(BTreeMap::new()),
            started_at: Utc::now(),
            last_health_check: RwLock::new(None),
        }
    }

    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    pub fn process_financial(
        &self,
        request: financial::FinancialOperationRequest,
    ) -> financial::FinancialOperationResponse {
        financial::execute(self, request)
    }

    pub fn process_hr(&self, request: hr::HrOperationRequest) -> hr::HrOperationResponse {
        hr::execute(self, request)
    }

    pub fn process_support_ticket(
        &self,
        request: support::SupportTicketRequest,
    ) -> support::SupportTicketResponse {
        support::execute(self, request)
    }

    pub async fn setup_integration(
        &self,
        request: integration::IntegrationSetupRequest,
    ) -> Result<integration::IntegrationSetupResponse> {
        integration::execute(self, request).await
    }

    pub fn system_status(&self) -> status::StatusResponse {
        status::execute(self)
    }

    pub fn root_info(&self) -> status::RootInfo {
        status::root_info(self)
    }

    pub fn health_check(&self) -> health::HealthReport {
        health::execute(self)
    }

    pub fn operations_analytics(&self) -> analytics::OperationsAnalytics {
        analytics::execute(self)
    }

    pub fn integrations_snapshot(&self) -> BTreeMap<String, IntegrationConfig> {
        self.integrations
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn integrations_count(&self) -> usize {
        self.integrations
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Point-in-time copy of the aggregate counters for the metrics table.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        let by_agent: serde_json::Map<String, serde_json::Value> = self
            .registry
            .operations_by_agent()
            .into_iter()
            .map(|(id, count)| (id.to_string(), serde_json::json!(count)))
            .collect();

        MetricsSnapshot {
            id: Uuid::now_v7(),
            captured_at: Utc::now().to_rfc3339(),
            total_operations: self.registry.total_operations(),
            operations_by_agent: serde_json::Value::Object(by_agent),
            total_agents: self.registry.len(),
            active_agents: self.registry.active_count(),
            average_accuracy: self.registry.average_accuracy(),
            integrations_configured: self.integrations_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::agent::AgentId;
    use crate::storage::memory::MemoryStorage;

    #[tokio::test]
    async fn test_metrics_snapshot_reflects_counters() {
        let engine = OpsdeskEngine::new(Arc::new(MemoryStorage::new()));
        engine.registry.record_operation(AgentId::FinancialOperations);
        engine.registry.record_operation(AgentId::FinancialOperations);
        engine.registry.record_operation(AgentId::HumanResources);

        let snapshot = engine.metrics_snapshot();
        assert_eq!(snapshot.total_operations, 3);
        assert_eq!(snapshot.total_agents, 9);
        assert_eq!(snapshot.active_agents, 9);
        assert_eq!(snapshot.integrations_configured, 0);
        assert_eq!(
            snapshot.operations_by_agent["financial_operations"],
            serde_json::json!(2)
        );
        assert_eq!(
            snapshot.operations_by_agent["human_resources"],
            serde_json::json!(1)
        );
    }

    #[tokio::test]
    async fn test_uptime_is_non_negative_and_grows() {
        let engine = OpsdeskEngine::new(Arc::new(MemoryStorage::new()));
        let first = engine.uptime_seconds();
        assert!(first >= 0.0);
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(engine.uptime_seconds() >= first);
    }
}
