use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;

use crate::model::agent::{Agent, AgentId};

use super::OpsdeskEngine;
use super::status::{SystemStatusView, system_view};

/// Agents reporting accuracy below this are flagged in the health report.
pub const ACCURACY_WARN_THRESHOLD: f64 = 0.90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Healthy,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentHealth {
    pub status: HealthState,
    pub name: String,
    pub capabilities: Vec<String>,
    pub wow_factor: String,
    pub operations_today: u64,
    pub accuracy_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthState,
    pub timestamp: String,
    pub system: SystemStatusView,
    pub agents: BTreeMap<AgentId, AgentHealth>,
    pub issues: Vec<String>,
}

/// An accuracy flag is a reported issue only; it does not change the
/// agent's operational status.
fn accuracy_issue(agent: &Agent) -> Option<String> {
    (agent.accuracy_rate < ACCURACY_WARN_THRESHOLD)
        .then(|| format!("{} accuracy below 90%", agent.name))
}

pub fn execute(engine: &OpsdeskEngine) -> HealthReport {
    // The system view is captured before the check is stamped, so the
    // report shows the previous check time.
    let system = system_view(engine);
    let mut issues = Vec::new();
    let mut agents = BTreeMap::new();

    for agent in engine.registry.snapshot() {
        let status = match accuracy_issue(&agent) {
            Some(issue) => {
                issues.push(issue);
                HealthState::Warning
            }
            None => HealthState::Healthy,
        };
        agents.insert(
            agent.id,
            AgentHealth {
                status,
                name: agent.name,
                capabilities: agent.capabilities,
                wow_factor: agent.wow_factor,
                operations_today: agent.operations_today,
                accuracy_rate: agent.accuracy_rate,
            },
        );
    }

    let report = HealthReport {
        status: HealthState::Healthy,
        timestamp: Utc::now().to_rfc3339(),
        system,
        agents,
        issues,
    };

    *engine
        .last_health_check
        .write()
        .unwrap_or_else(|e| e.into_inner()) = Some(Utc::now());

    report
}
