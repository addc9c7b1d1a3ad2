use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::model::agent::AgentId;
use crate::model::operation::{FinancialOperationType, OperationStatus, operation_id};
use crate::storage::{FinancialOperationRow, OperationRecord};

use super::OpsdeskEngine;

pub(crate) const PROCESSING_TIME: &str = "0.3 seconds";
pub(crate) const ACCURACY_CONFIDENCE: f64 = 0.999;

#[derive(Debug, Clone, Deserialize)]
pub struct FinancialOperationRequest {
    pub operation_type: String,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialOperationResponse {
    pub operation_id: String,
    pub operation_type: String,
    pub status: OperationStatus,
    pub processed_by: AgentId,
    pub processing_time: &'static str,
    pub accuracy_confidence: f64,
    pub timestamp: String,
    #[serde(flatten)]
    pub details: Option<FinancialDetails>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FinancialDetails {
    Invoice {
        invoice_number: String,
        amount: f64,
        due_date: String,
        payment_terms: &'static str,
        tax_calculated: bool,
        compliance_checked: bool,
    },
    Expense {
        expense_id: String,
        amount: f64,
        category: String,
        approval_status: &'static str,
        reimbursement_scheduled: bool,
    },
    CashFlow {
        prediction_period: &'static str,
        predicted_cash_flow: i64,
        confidence_level: f64,
        key_factors: Vec<&'static str>,
        recommendations: Vec<&'static str>,
    },
}

pub fn execute(
    engine: &OpsdeskEngine,
    request: FinancialOperationRequest,
) -> FinancialOperationResponse {
    let operation_id = operation_id("fin");
    let now = Utc::now();

    // Unrecognized operation types fall through to a response carrying only
    // the common fields.
    let details = match request.operation_type.parse::<FinancialOperationType>() {
        Ok(FinancialOperationType::InvoiceProcessing) => Some(FinancialDetails::Invoice {
            invoice_number: format!("INV-{operation_id}"),
            amount: request.amount.unwrap_or(1500.00),
            due_date: (now + Duration::days(30)).to_rfc3339(),
            payment_terms: "Net 30",
            tax_calculated: true,
            compliance_checked: true,
        }),
        Ok(FinancialOperationType::ExpenseReport) => Some(FinancialDetails::Expense {
            expense_id: format!("EXP-{operation_id}"),
            amount: request.amount.unwrap_or(250.00),
            category: request
                .category
                .clone()
                .unwrap_or_else(|| "business_travel".to_string()),
            approval_status: "auto_approved",
            reimbursement_scheduled: true,
        }),
        Ok(FinancialOperationType::CashFlowPrediction) => Some(FinancialDetails::CashFlow {
            prediction_period: "90 days",
            predicted_cash_flow: 2_500_000,
            confidence_level: 0.94,
            key_factors: vec!["seasonal_trends", "payment_cycles", "expense_patterns"],
            recommendations: vec!["optimize_payment_terms", "accelerate_collections"],
        }),
        Err(_) => None,
    };

    engine.registry.record_operation(AgentId::FinancialOperations);

    let response = FinancialOperationResponse {
        operation_id: operation_id.clone(),
        operation_type: request.operation_type.clone(),
        status: OperationStatus::Completed,
        processed_by: AgentId::FinancialOperations,
        processing_time: PROCESSING_TIME,
        accuracy_confidence: ACCURACY_CONFIDENCE,
        timestamp: now.to_rfc3339(),
        details,
    };

    engine
        .recorder
        .record(OperationRecord::Financial(FinancialOperationRow {
            operation_id,
            operation_type: request.operation_type,
            status: response.status.to_string(),
            amount: request.amount,
            category: request.category,
            processed_by: AgentId::FinancialOperations.to_string(),
            accuracy_confidence: ACCURACY_CONFIDENCE,
            created_at: now.to_rfc3339(),
            metadata: json!({ "description": request.description }),
        }));

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;
    use std::sync::Arc;

    fn test_engine() -> OpsdeskEngine {
        OpsdeskEngine::new(Arc::new(MemoryStorage::new()))
    }

    fn request(operation_type: &str) -> FinancialOperationRequest {
        FinancialOperationRequest {
            operation_type: operation_type.to_string(),
            amount: None,
            description: None,
            category: None,
        }
    }

    #[tokio::test]
    async fn test_invoice_processing_details() {
        let engine = test_engine();
        let response = execute(&engine, request("invoice_processing"));

        assert!(response.operation_id.starts_with("fin_"));
        assert_eq!(response.status, OperationStatus::Completed);
        assert_eq!(response.processed_by, AgentId::FinancialOperations);

        match response.details {
            Some(FinancialDetails::Invoice {
                ref invoice_number,
                amount,
                payment_terms,
                ..
            }) => {
                assert_eq!(*invoice_number, format!("INV-{}", response.operation_id));
                assert_eq!(amount, 1500.00);
                assert_eq!(payment_terms, "Net 30");
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_expense_report_uses_request_values() {
        let engine = test_engine();
        let response = execute(
            &engine,
            FinancialOperationRequest {
                operation_type: "expense_report".to_string(),
                amount: Some(99.5),
                description: Some("client dinner".to_string()),
                category: Some("meals".to_string()),
            },
        );

        match response.details {
            Some(FinancialDetails::Expense {
                amount,
                ref category,
                approval_status,
                ..
            }) => {
                assert_eq!(amount, 99.5);
                assert_eq!(category, "meals");
                assert_eq!(approval_status, "auto_approved");
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unsupported_type_returns_common_fields_only() {
        let engine = test_engine();
        let response = execute(&engine, request("crystal_ball_audit"));

        assert!(response.details.is_none());
        assert_eq!(response.operation_type, "crystal_ball_audit");

        // The flattened payload must not leak any domain keys.
        let value = serde_json::to_value(&response).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert!(keys.iter().all(|k| {
            [
                "operation_id",
                "operation_type",
                "status",
                "processed_by",
                "processing_time",
                "accuracy_confidence",
                "timestamp",
            ]
            .contains(&k.as_str())
        }));
    }

    #[tokio::test]
    async fn test_details_flatten_to_top_level() {
        let engine = test_engine();
        let response = execute(&engine, request("cash_flow_prediction"));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["prediction_period"], "90 days");
        assert_eq!(value["predicted_cash_flow"], 2_500_000);
    }

    #[tokio::test]
    async fn test_counters_move_by_exactly_one() {
        let engine = test_engine();
        execute(&engine, request("invoice_processing"));
        assert_eq!(
            engine.registry.operations_today(AgentId::FinancialOperations),
            1
        );
        assert_eq!(engine.registry.total_operations(), 1);
    }
}
