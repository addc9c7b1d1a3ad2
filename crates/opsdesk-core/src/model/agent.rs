use serde::{Deserialize, Serialize};

/// The fixed set of nine back-office agents. Variant order is the stable
/// order reported by every listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentId {
    FinancialOperations,
    HumanResources,
    CustomerSupport,
    OperationsManagement,
    ComplianceLegal,
    DataIntelligence,
    CommunicationOrchestrator,
    SecurityIt,
    ExecutiveIntelligence,
}

impl AgentId {
    pub const ALL: [AgentId; 9] = [
        AgentId::FinancialOperations,
        AgentId::HumanResources,
        AgentId::CustomerSupport,
        AgentId::OperationsManagement,
        AgentId::ComplianceLegal,
        AgentId::DataIntelligence,
        AgentId::CommunicationOrchestrator,
        AgentId::SecurityIt,
        AgentId::ExecutiveIntelligence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentId::FinancialOperations => "financial_operations",
            AgentId::HumanResources => "human_resources",
            AgentId::CustomerSupport => "customer_support",
            AgentId::OperationsManagement => "operations_management",
            AgentId::ComplianceLegal => "compliance_legal",
            AgentId::DataIntelligence => "data_intelligence",
            AgentId::CommunicationOrchestrator => "communication_orchestrator",
            AgentId::SecurityIt => "security_it",
            AgentId::ExecutiveIntelligence => "executive_intelligence",
        }
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgentId {
    type Err = crate::error::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        AgentId::ALL
            .iter()
            .find(|id| id.as_str() == s)
            .copied()
            .ok_or_else(|| crate::error::Error::Validation(format!("unknown agent id: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Active,
    Inactive,
}

/// Descriptor for one back-office agent as reported by the API. Everything
/// except `operations_today` is static for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub status: AgentStatus,
    pub capabilities: Vec<String>,
    pub wow_factor: String,
    pub operations_today: u64,
    pub accuracy_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_id_display_fromstr() {
        assert_eq!(AgentId::FinancialOperations.to_string(), "financial_operations");
        assert_eq!(
            "customer_support".parse::<AgentId>().unwrap(),
            AgentId::CustomerSupport
        );
        assert_eq!("security_it".parse::<AgentId>().unwrap(), AgentId::SecurityIt);
        assert!("front_office".parse::<AgentId>().is_err());
    }

    #[test]
    fn test_agent_id_serde_snake_case() {
        let json = serde_json::to_string(&AgentId::ExecutiveIntelligence).unwrap();
        assert_eq!(json, "\"executive_intelligence\"");
    }

    #[test]
    fn test_agent_set_is_fixed_at_nine() {
        assert_eq!(AgentId::ALL.len(), 9);
    }
}
