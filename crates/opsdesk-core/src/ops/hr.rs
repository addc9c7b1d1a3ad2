use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::model::agent::AgentId;
use crate::model::operation::{HrOperationType, OperationStatus, operation_id};
use crate::storage::{HrOperationRow, OperationRecord};

use super::OpsdeskEngine;

pub(crate) const PROCESSING_TIME: &str = "0.5 seconds";
pub(crate) const ACCURACY_CONFIDENCE: f64 = 0.96;

#[derive(Debug, Clone, Deserialize)]
pub struct HrOperationRequest {
    pub operation_type: String,
    pub employee_id: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HrOperationResponse {
    pub operation_id: String,
    pub operation_type: String,
    pub status: OperationStatus,
    pub processed_by: AgentId,
    pub processing_time: &'static str,
    pub accuracy_confidence: f64,
    pub timestamp: String,
    #[serde(flatten)]
    pub details: Option<HrDetails>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum HrDetails {
    Screening {
        candidate_id: String,
        position: String,
        screening_score: f64,
        qualification_match: f64,
        cultural_fit_score: f64,
        recommendation: &'static str,
        predicted_success_rate: f64,
    },
    Payroll {
        payroll_period: &'static str,
        employees_processed: u32,
        total_payroll: i64,
        tax_calculations: &'static str,
        direct_deposits: &'static str,
        compliance_verified: bool,
    },
    Review {
        employee_id: String,
        review_period: &'static str,
        performance_score: f64,
        goal_achievement: f64,
        development_recommendations: Vec<&'static str>,
        retention_risk: &'static str,
    },
}

pub fn execute(engine: &OpsdeskEngine, request: HrOperationRequest) -> HrOperationResponse {
    let operation_id = operation_id("hr");
    let now = Utc::now();

    let details = match request.operation_type.parse::<HrOperationType>() {
        Ok(HrOperationType::CandidateScreening) => Some(HrDetails::Screening {
            candidate_id: format!("CAND-{operation_id}"),
            position: request
                .position
                .clone()
                .unwrap_or_else(|| "Software Engineer".to_string()),
            screening_score: 0.87,
            qualification_match: 0.92,
            cultural_fit_score: 0.84,
            recommendation: "proceed_to_interview",
            predicted_success_rate: 0.78,
        }),
        Ok(HrOperationType::PayrollProcessing) => Some(HrDetails::Payroll {
            payroll_period: "2024-01",
            employees_processed: 150,
            total_payroll: 750_000,
            tax_calculations: "completed",
            direct_deposits: "scheduled",
            compliance_verified: true,
        }),
        Ok(HrOperationType::PerformanceReview) => Some(HrDetails::Review {
            employee_id: request
                .employee_id
                .clone()
                .unwrap_or_else(|| "EMP-001".to_string()),
            review_period: "Q4-2023",
            performance_score: 0.88,
            goal_achievement: 0.92,
            development_recommendations: vec!["leadership_training", "technical_certification"],
            retention_risk: "low",
        }),
        Err(_) => None,
    };

    engine.registry.record_operation(AgentId::HumanResources);

    let response = HrOperationResponse {
        operation_id: operation_id.clone(),
        operation_type: request.operation_type.clone(),
        status: OperationStatus::Completed,
        processed_by: AgentId::HumanResources,
        processing_time: PROCESSING_TIME,
        accuracy_confidence: ACCURACY_CONFIDENCE,
        timestamp: now.to_rfc3339(),
        details,
    };

    engine.recorder.record(OperationRecord::Hr(HrOperationRow {
        operation_id,
        operation_type: request.operation_type,
        status: response.status.to_string(),
        employee_id: request.employee_id,
        department: request.department,
        processed_by: AgentId::HumanResources.to_string(),
        accuracy_confidence: ACCURACY_CONFIDENCE,
        created_at: now.to_rfc3339(),
        metadata: json!({ "position": request.position }),
    }));

    response
}
