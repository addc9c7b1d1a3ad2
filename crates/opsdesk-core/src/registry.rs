//! Fixed registry of the nine back-office agents.
//!
//! The descriptor set never changes at runtime; only the per-agent operation
//! counters move, and only upward. The registry is owned by the engine and
//! injected into handlers rather than living in a process-wide global.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::agent::{Agent, AgentId, AgentStatus};

struct AgentEntry {
    id: AgentId,
    name: &'static str,
    status: AgentStatus,
    capabilities: &'static [&'static str],
    wow_factor: &'static str,
    accuracy_rate: f64,
    operations_today: AtomicU64,
}

impl AgentEntry {
    fn new(
        id: AgentId,
        name: &'static str,
        capabilities: &'static [&'static str],
        wow_factor: &'static str,
        accuracy_rate: f64,
    ) -> Self {
        Self {
            id,
            name,
            status: AgentStatus::Active,
            capabilities,
            wow_factor,
            accuracy_rate,
            operations_today: AtomicU64::new(0),
        }
    }

    fn descriptor(&self) -> Agent {
        Agent {
            id: self.id,
            name: self.name.to_string(),
            status: self.status,
            capabilities: self.capabilities.iter().map(|c| c.to_string()).collect(),
            wow_factor: self.wow_factor.to_string(),
            operations_today: self.operations_today.load(Ordering::Relaxed),
            accuracy_rate: self.accuracy_rate,
        }
    }
}

pub struct AgentRegistry {
    entries: Vec<AgentEntry>,
    total_operations: AtomicU64,
}

impl AgentRegistry {
    pub fn new() -> Self {
        let entries = vec![
            AgentEntry::new(
                AgentId::FinancialOperations,
                "Financial Operations Agent",
                &[
                    "invoice_processing",
                    "expense_management",
                    "financial_reporting",
                    "cash_flow_prediction",
                ],
                "Predictive Cash Flow Intelligence - Predicts financial needs 90 days in advance",
                0.999,
            ),
            AgentEntry::new(
                AgentId::HumanResources,
                "Human Resources Agent",
                &[
                    "recruitment",
                    "payroll_processing",
                    "employee_management",
                    "performance_tracking",
                ],
                "Talent Intelligence Engine - Identifies perfect candidates before they apply",
                0.96,
            ),
            AgentEntry::new(
                AgentId::CustomerSupport,
                "Customer Support Agent",
                &[
                    "ticket_management",
                    "issue_resolution",
                    "customer_satisfaction",
                    "24_7_support",
                ],
                "Emotional Resolution Engine - Turns angry customers into brand advocates",
                0.95,
            ),
            AgentEntry::new(
                AgentId::OperationsManagement,
                "Operations Management Agent",
                &[
                    "inventory_management",
                    "supply_chain",
                    "vendor_management",
                    "logistics",
                ],
                "Supply Chain Prophecy - Predicts and prevents operational disruptions",
                0.94,
            ),
            AgentEntry::new(
                AgentId::ComplianceLegal,
                "Compliance & Legal Agent",
                &[
                    "regulatory_monitoring",
                    "contract_review",
                    "compliance_reporting",
                    "risk_assessment",
                ],
                "Regulatory Crystal Ball - Predicts regulatory changes before they're announced",
                0.98,
            ),
            AgentEntry::new(
                AgentId::DataIntelligence,
                "Data Intelligence Agent",
                &[
                    "business_analytics",
                    "predictive_insights",
                    "reporting",
                    "kpi_monitoring",
                ],
                "Business Intelligence Omniscience - Knows everything about your business in real-time",
                0.96,
            ),
            AgentEntry::new(
                AgentId::CommunicationOrchestrator,
                "Communication Orchestrator Agent",
                &[
                    "meeting_coordination",
                    "email_management",
                    "internal_communications",
                    "collaboration",
                ],
                "Perfect Communication Harmony - Ensures every message is perfectly timed and targeted",
                0.92,
            ),
            AgentEntry::new(
                AgentId::SecurityIt,
                "Security & IT Agent",
                &[
                    "cybersecurity",
                    "system_maintenance",
                    "user_management",
                    "threat_detection",
                ],
                "Cyber Threat Precognition - Stops cyber attacks before they happen",
                0.99,
            ),
            AgentEntry::new(
                AgentId::ExecutiveIntelligence,
                "Executive Intelligence Agent",
                &[
                    "executive_dashboards",
                    "strategic_analysis",
                    "board_preparation",
                    "decision_support",
                ],
                "Strategic Omniscience - Provides CEOs with perfect situational awareness",
                0.97,
            ),
        ];

        Self {
            entries,
            total_operations: AtomicU64::new(0),
        }
    }

    fn entry(&self, id: AgentId) -> &AgentEntry {
        // The registry always holds every AgentId variant.
        self.entries
            .iter()
            .find(|e| e.id == id)
            .unwrap_or(&self.entries[0])
    }

    /// Count one processed operation against the agent and the global total.
    pub fn record_operation(&self, id: AgentId) {
        self.entry(id).operations_today.fetch_add(1, Ordering::Relaxed);
        self.total_operations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn operations_today(&self, id: AgentId) -> u64 {
        self.entry(id).operations_today.load(Ordering::Relaxed)
    }

    pub fn total_operations(&self) -> u64 {
        self.total_operations.load(Ordering::Relaxed)
    }

    /// Descriptors for all agents in declaration order.
    pub fn snapshot(&self) -> Vec<Agent> {
        self.entries.iter().map(AgentEntry::descriptor).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == AgentStatus::Active)
            .count()
    }

    pub fn average_accuracy(&self) -> f64 {
        let sum: f64 = self.entries.iter().map(|e| e.accuracy_rate).sum();
        sum / self.entries.len() as f64
    }

    /// Per-agent operation counts keyed by agent id, for metrics snapshots
    /// and analytics.
    pub fn operations_by_agent(&self) -> Vec<(AgentId, u64)> {
        self.entries
            .iter()
            .map(|e| (e.id, e.operations_today.load(Ordering::Relaxed)))
            .collect()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_holds_nine_active_agents() {
        let registry = AgentRegistry::new();
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.active_count(), 9);
    }

    #[test]
    fn test_snapshot_order_is_stable() {
        let registry = AgentRegistry::new();
        let first = registry.snapshot();
        let second = registry.snapshot();
        let ids: Vec<AgentId> = first.iter().map(|a| a.id).collect();
        assert_eq!(ids, AgentId::ALL);
        assert_eq!(first, second);
    }

    #[test]
    fn test_record_operation_increments_both_counters() {
        let registry = AgentRegistry::new();
        registry.record_operation(AgentId::HumanResources);
        registry.record_operation(AgentId::HumanResources);
        registry.record_operation(AgentId::CustomerSupport);

        assert_eq!(registry.operations_today(AgentId::HumanResources), 2);
        assert_eq!(registry.operations_today(AgentId::CustomerSupport), 1);
        assert_eq!(registry.operations_today(AgentId::SecurityIt), 0);
        assert_eq!(registry.total_operations(), 3);
    }

    #[test]
    fn test_all_shipped_accuracies_clear_the_health_threshold() {
        let registry = AgentRegistry::new();
        for agent in registry.snapshot() {
            assert!(agent.accuracy_rate >= 0.92, "{} too low", agent.name);
        }
    }

    #[test]
    fn test_average_accuracy() {
        let registry = AgentRegistry::new();
        let avg = registry.average_accuracy();
        assert!((avg - 0.9632222222222222).abs() < 1e-9);
    }
}
