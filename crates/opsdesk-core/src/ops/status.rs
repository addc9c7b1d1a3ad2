use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::agent::{Agent, AgentId};

use super::OpsdeskEngine;

pub(crate) const SERVICE_STATUS: &str = "running";
pub(crate) const UPTIME_PERCENTAGE: f64 = 99.9;

const GREETING: &str = "Opsdesk AI Back Office System";

#[derive(Debug, Clone, Serialize)]
pub struct SystemStatusView {
    pub status: &'static str,
    pub start_time: String,
    pub agents_active: usize,
    pub total_operations_processed: u64,
    pub last_health_check: Option<String>,
    pub uptime_percentage: f64,
    pub uptime_seconds: f64,
    pub uptime_hours: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceView {
    pub total_agents: usize,
    pub active_agents: usize,
    pub operations_processed_today: u64,
    pub average_accuracy: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub system: SystemStatusView,
    pub agents: BTreeMap<AgentId, Agent>,
    pub performance: PerformanceView,
    pub api_integrations: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RootInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub agents_active: usize,
    pub wow_factors: Vec<String>,
    pub uptime_percentage: f64,
}

pub(crate) fn system_view(engine: &OpsdeskEngine) -> SystemStatusView {
    let uptime_seconds = engine.uptime_seconds();
    SystemStatusView {
        status: SERVICE_STATUS,
        start_time: engine.started_at.to_rfc3339(),
        agents_active: engine.registry.active_count(),
        total_operations_processed: engine.registry.total_operations(),
        last_health_check: engine
            .last_health_check
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .map(|t| t.to_rfc3339()),
        uptime_percentage: UPTIME_PERCENTAGE,
        uptime_seconds,
        uptime_hours: uptime_seconds / 3600.0,
    }
}

pub fn execute(engine: &OpsdeskEngine) -> StatusResponse {
    let agents = engine
        .registry
        .snapshot()
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    StatusResponse {
        system: system_view(engine),
        agents,
        performance: PerformanceView {
            total_agents: engine.registry.len(),
            active_agents: engine.registry.active_count(),
            operations_processed_today: engine.registry.total_operations(),
            average_accuracy: engine.registry.average_accuracy(),
        },
        api_integrations: engine.integrations_count(),
    }
}

pub fn root_info(engine: &OpsdeskEngine) -> RootInfo {
    RootInfo {
        message: GREETING,
        version: env!("CARGO_PKG_VERSION"),
        status: SERVICE_STATUS,
        agents_active: engine.registry.active_count(),
        wow_factors: engine
            .registry
            .snapshot()
            .into_iter()
            .map(|a| a.wow_factor)
            .collect(),
        uptime_percentage: UPTIME_PERCENTAGE,
    }
}
