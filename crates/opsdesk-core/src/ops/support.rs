use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::model::agent::AgentId;
use crate::model::operation::{OperationStatus, TicketPriority, UrgencyLevel, ticket_id};
use crate::storage::{OperationRecord, SupportTicketRow};

use super::OpsdeskEngine;

pub(crate) const PROCESSING_TIME: &str = "2.1 seconds";
pub(crate) const RESOLUTION_TIME: &str = "4 minutes";
pub(crate) const SATISFACTION_PREDICTED: f64 = 0.92;

#[derive(Debug, Clone, Deserialize)]
pub struct SupportTicketRequest {
    pub customer_id: String,
    pub issue_type: String,
    #[serde(default)]
    pub priority: TicketPriority,
    pub description: String,
}

/// Synthetic sentiment readout attached to every ticket. Only the urgency
/// level varies, and only with the requested priority; nothing is derived
/// from the ticket text.
#[derive(Debug, Clone, Serialize)]
pub struct EmotionAnalysis {
    pub detected_emotion: &'static str,
    pub sentiment_score: f64,
    pub urgency_level: UrgencyLevel,
    pub resolution_strategy: &'static str,
}

impl EmotionAnalysis {
    pub fn for_priority(priority: TicketPriority) -> Self {
        Self {
            detected_emotion: "frustrated",
            sentiment_score: -0.3,
            urgency_level: UrgencyLevel::from_priority(priority),
            resolution_strategy: "empathetic_response_with_immediate_action",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SupportTicketResponse {
    pub ticket_id: String,
    pub customer_id: String,
    pub issue_type: String,
    pub priority: TicketPriority,
    pub status: OperationStatus,
    pub processed_by: AgentId,
    pub processing_time: &'static str,
    pub resolution_time: &'static str,
    pub customer_satisfaction_predicted: f64,
    pub emotion_analysis: EmotionAnalysis,
    pub resolution_summary: String,
    pub follow_up_scheduled: bool,
    pub timestamp: String,
}

pub fn execute(engine: &OpsdeskEngine, request: SupportTicketRequest) -> SupportTicketResponse {
    let ticket_id = ticket_id();
    let now = Utc::now();
    let emotion_analysis = EmotionAnalysis::for_priority(request.priority);

    engine.registry.record_operation(AgentId::CustomerSupport);

    let response = SupportTicketResponse {
        ticket_id: ticket_id.clone(),
        customer_id: request.customer_id.clone(),
        issue_type: request.issue_type.clone(),
        priority: request.priority,
        status: OperationStatus::Resolved,
        processed_by: AgentId::CustomerSupport,
        processing_time: PROCESSING_TIME,
        resolution_time: RESOLUTION_TIME,
        customer_satisfaction_predicted: SATISFACTION_PREDICTED,
        resolution_summary: format!(
            "Issue '{}' resolved using automated workflow with personalized response",
            request.issue_type
        ),
        follow_up_scheduled: true,
        timestamp: now.to_rfc3339(),
        emotion_analysis,
    };

    engine
        .recorder
        .record(OperationRecord::Support(SupportTicketRow {
            ticket_id,
            customer_id: request.customer_id,
            issue_type: request.issue_type,
            priority: request.priority.to_string(),
            status: response.status.to_string(),
            urgency_level: response.emotion_analysis.urgency_level.to_string(),
            sentiment_score: response.emotion_analysis.sentiment_score,
            satisfaction_predicted: SATISFACTION_PREDICTED,
            processed_by: AgentId::CustomerSupport.to_string(),
            created_at: now.to_rfc3339(),
            metadata: json!({ "description": request.description }),
        }));

    response
}
