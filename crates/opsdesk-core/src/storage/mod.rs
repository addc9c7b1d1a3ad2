pub mod memory;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::{Error, Result};
use crate::model::integration::IntegrationConfig;
use crate::model::metrics::MetricsSnapshot;

/// Ordered column name/value pairs for one domain-table row. Backends build
/// a parameterized insert from exactly these keys, in this order. Optional
/// request fields that were absent are omitted rather than bound as NULL.
pub type ColumnValues = Vec<(&'static str, Value)>;

/// One operation bound for its domain table. All domain-table writes flow
/// through [`StorageBackend::insert_operation`]; nothing else appends.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationRecord {
    Financial(FinancialOperationRow),
    Hr(HrOperationRow),
    Support(SupportTicketRow),
}

impl OperationRecord {
    pub fn table(&self) -> &'static str {
        match self {
            OperationRecord::Financial(_) => "financial_operations",
            OperationRecord::Hr(_) => "hr_operations",
            OperationRecord::Support(_) => "support_tickets",
        }
    }

    pub fn columns(&self) -> ColumnValues {
        match self {
            OperationRecord::Financial(row) => row.columns(),
            OperationRecord::Hr(row) => row.columns(),
            OperationRecord::Support(row) => row.columns(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialOperationRow {
    pub operation_id: String,
    pub operation_type: String,
    pub status: String,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub processed_by: String,
    pub accuracy_confidence: f64,
    pub created_at: String,
    pub metadata: Value,
}

impl FinancialOperationRow {
    fn columns(&self) -> ColumnValues {
        let mut columns: ColumnValues = vec![
            ("operation_id", json!(self.operation_id)),
            ("operation_type", json!(self.operation_type)),
            ("status", json!(self.status)),
        ];
        if let Some(amount) = self.amount {
            columns.push(("amount", json!(amount)));
        }
        if let Some(ref category) = self.category {
            columns.push(("category", json!(category)));
        }
        columns.push(("processed_by", json!(self.processed_by)));
        columns.push(("accuracy_confidence", json!(self.accuracy_confidence)));
        columns.push(("created_at", json!(self.created_at)));
        columns.push(("metadata", self.metadata.clone()));
        columns
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HrOperationRow {
    pub operation_id: String,
    pub operation_type: String,
    pub status: String,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub processed_by: String,
    pub accuracy_confidence: f64,
    pub created_at: String,
    pub metadata: Value,
}

impl HrOperationRow {
    fn columns(&self) -> ColumnValues {
        let mut columns: ColumnValues = vec![
            ("operation_id", json!(self.operation_id)),
            ("operation_type", json!(self.operation_type)),
            ("status", json!(self.status)),
        ];
        if let Some(ref employee_id) = self.employee_id {
            columns.push(("employee_id", json!(employee_id)));
        }
        if let Some(ref department) = self.department {
            columns.push(("department", json!(department)));
        }
        columns.push(("processed_by", json!(self.processed_by)));
        columns.push(("accuracy_confidence", json!(self.accuracy_confidence)));
        columns.push(("created_at", json!(self.created_at)));
        columns.push(("metadata", self.metadata.clone()));
        columns
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupportTicketRow {
    pub ticket_id: String,
    pub customer_id: String,
    pub issue_type: String,
    pub priority: String,
    pub status: String,
    pub urgency_level: String,
    pub sentiment_score: f64,
    pub satisfaction_predicted: f64,
    pub processed_by: String,
    pub created_at: String,
    pub metadata: Value,
}

impl SupportTicketRow {
    fn columns(&self) -> ColumnValues {
        vec![
            ("ticket_id", json!(self.ticket_id)),
            ("customer_id", json!(self.customer_id)),
            ("issue_type", json!(self.issue_type)),
            ("priority", json!(self.priority)),
            ("status", json!(self.status)),
            ("urgency_level", json!(self.urgency_level)),
            ("sentiment_score", json!(self.sentiment_score)),
            ("satisfaction_predicted", json!(self.satisfaction_predicted)),
            ("processed_by", json!(self.processed_by)),
            ("created_at", json!(self.created_at)),
            ("metadata", self.metadata.clone()),
        ]
    }
}

#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Append one operation to its domain table. The single append path for
    /// all domain tables.
    async fn insert_operation(&self, record: &OperationRecord) -> Result<()>;

    /// Create or replace an integration row keyed by `integration_id`.
    async fn upsert_integration(&self, config: &IntegrationConfig) -> Result<()>;

    /// Append one metrics snapshot.
    async fn insert_metrics_snapshot(&self, snapshot: &MetricsSnapshot) -> Result<()>;
}

/// Installed when no connection string is configured: the process runs, but
/// every store-touching call fails with a storage error naming the missing
/// variable. Callers downgrade or surface that per their own policy.
pub struct UnconfiguredStorage {
    variable: &'static str,
}

impl UnconfiguredStorage {
    pub fn new(variable: &'static str) -> Self {
        Self { variable }
    }

    fn unset(&self) -> Error {
        Error::Storage(format!("{} is not set", self.variable))
    }
}

#[async_trait]
impl StorageBackend for UnconfiguredStorage {
    async fn insert_operation(&self, _record: &OperationRecord) -> Result<()> {
        Err(self.unset())
    }

    async fn upsert_integration(&self, _config: &IntegrationConfig) -> Result<()> {
        Err(self.unset())
    }

    async fn insert_metrics_snapshot(&self, _snapshot: &MetricsSnapshot) -> Result<()> {
        Err(self.unset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_financial_row(amount: Option<f64>) -> FinancialOperationRow {
        FinancialOperationRow {
            operation_id: "fin_1".to_string(),
            operation_type: "invoice_processing".to_string(),
            status: "completed".to_string(),
            amount,
            category: None,
            processed_by: "financial_operations".to_string(),
            accuracy_confidence: 0.999,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            metadata: json!({"description": null}),
        }
    }

    #[test]
    fn test_record_table_names() {
        let record = OperationRecord::Financial(sample_financial_row(None));
        assert_eq!(record.table(), "financial_operations");
    }

    #[test]
    fn test_absent_optional_fields_are_omitted() {
        let with = OperationRecord::Financial(sample_financial_row(Some(10.0)));
        let without = OperationRecord::Financial(sample_financial_row(None));

        let names = |r: &OperationRecord| -> Vec<&str> {
            r.columns().iter().map(|(n, _)| *n).collect()
        };
        assert!(names(&with).contains(&"amount"));
        assert!(!names(&without).contains(&"amount"));
    }

    #[test]
    fn test_column_order_is_declaration_order() {
        let record = OperationRecord::Financial(sample_financial_row(Some(10.0)));
        let names: Vec<&str> = record.columns().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec![
                "operation_id",
                "operation_type",
                "status",
                "amount",
                "processed_by",
                "accuracy_confidence",
                "created_at",
                "metadata",
            ]
        );
    }

    #[tokio::test]
    async fn test_unconfigured_storage_always_fails() {
        let storage = UnconfiguredStorage::new("OPSDESK_DATABASE_URL");
        let record = OperationRecord::Financial(sample_financial_row(None));
        let err = storage.insert_operation(&record).await.unwrap_err();
        assert!(err.to_string().contains("OPSDESK_DATABASE_URL"));
    }
}
