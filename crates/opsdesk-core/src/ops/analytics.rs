use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::agent::AgentId;

use super::OpsdeskEngine;

/// Marketing-grade constants reported by the analytics endpoint. These are
/// fixed claims, not computed from recorded data.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetrics {
    pub administrative_overhead_reduction: &'static str,
    pub operational_accuracy_improvement: &'static str,
    pub response_time_improvement: &'static str,
    pub cost_reduction: &'static str,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            administrative_overhead_reduction: "80%",
            operational_accuracy_improvement: "95%",
            response_time_improvement: "70%",
            cost_reduction: "60%",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CostSavings {
    pub monthly_savings: u64,
    pub annual_projected_savings: u64,
    pub roi_percentage: u64,
}

impl Default for CostSavings {
    fn default() -> Self {
        Self {
            monthly_savings: 125_000,
            annual_projected_savings: 1_500_000,
            roi_percentage: 2156,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationsAnalytics {
    pub system_uptime: f64,
    pub total_agents: usize,
    pub active_agents: usize,
    pub total_operations_processed: u64,
    pub operations_by_agent: BTreeMap<AgentId, u64>,
    pub average_accuracy: f64,
    pub performance_metrics: PerformanceMetrics,
    pub cost_savings: CostSavings,
}

pub fn execute(engine: &OpsdeskEngine) -> OperationsAnalytics {
    OperationsAnalytics {
        system_uptime: engine.uptime_seconds(),
        total_agents: engine.registry.len(),
        active_agents: engine.registry.active_count(),
        total_operations_processed: engine.registry.total_operations(),
        operations_by_agent: engine.registry.operations_by_agent().into_iter().collect(),
        average_accuracy: engine.registry.average_accuracy(),
        performance_metrics: PerformanceMetrics::default(),
        cost_savings: CostSavings::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_analytics_aggregates_per_agent_counts() {
        let engine = OpsdeskEngine::new(Arc::new(MemoryStorage::new()));
        engine.registry.record_operation(AgentId::CustomerSupport);
        engine.registry.record_operation(AgentId::CustomerSupport);

        let analytics = execute(&engine);
        assert_eq!(analytics.total_operations_processed, 2);
        assert_eq!(analytics.operations_by_agent[&AgentId::CustomerSupport], 2);
        assert_eq!(analytics.operations_by_agent.len(), 9);
        assert_eq!(analytics.total_agents, 9);
    }

    #[tokio::test]
    async fn test_fixed_claims_are_reported_verbatim() {
        let engine = OpsdeskEngine::new(Arc::new(MemoryStorage::new()));
        let analytics = execute(&engine);
        assert_eq!(
            analytics.performance_metrics.administrative_overhead_reduction,
            "80%"
        );
        assert_eq!(analytics.cost_savings.monthly_savings, 125_000);
        assert_eq!(analytics.cost_savings.roi_percentage, 2156);
    }
}
