use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a collision-resistant operation identifier with a short domain
/// prefix, e.g. `fin_018f4c3a...`.
pub fn operation_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::now_v7().simple())
}

/// Support tickets keep the uppercase `TICKET-` prefix of their id scheme.
pub fn ticket_id() -> String {
    format!("TICKET-{}", Uuid::now_v7().simple())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialOperationType {
    InvoiceProcessing,
    ExpenseReport,
    CashFlowPrediction,
}

impl std::fmt::Display for FinancialOperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinancialOperationType::InvoiceProcessing => write!(f, "invoice_processing"),
            FinancialOperationType::ExpenseReport => write!(f, "expense_report"),
            FinancialOperationType::CashFlowPrediction => write!(f, "cash_flow_prediction"),
        }
    }
}

impl std::str::FromStr for FinancialOperationType {
    type Err = crate::error::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "invoice_processing" => Ok(FinancialOperationType::InvoiceProcessing),
            "expense_report" => Ok(FinancialOperationType::ExpenseReport),
            "cash_flow_prediction" => Ok(FinancialOperationType::CashFlowPrediction),
            _ => Err(crate::error::Error::Validation(format!(
                "unsupported financial operation: {s}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrOperationType {
    CandidateScreening,
    PayrollProcessing,
    PerformanceReview,
}

impl std::fmt::Display for HrOperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HrOperationType::CandidateScreening => write!(f, "candidate_screening"),
            HrOperationType::PayrollProcessing => write!(f, "payroll_processing"),
            HrOperationType::PerformanceReview => write!(f, "performance_review"),
        }
    }
}

impl std::str::FromStr for HrOperationType {
    type Err = crate::error::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "candidate_screening" => Ok(HrOperationType::CandidateScreening),
            "payroll_processing" => Ok(HrOperationType::PayrollProcessing),
            "performance_review" => Ok(HrOperationType::PerformanceReview),
            _ => Err(crate::error::Error::Validation(format!(
                "unsupported hr operation: {s}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketPriority::Low => write!(f, "low"),
            TicketPriority::Medium => write!(f, "medium"),
            TicketPriority::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Medium,
    High,
}

impl UrgencyLevel {
    /// High-priority tickets escalate to high urgency; everything else is medium.
    pub fn from_priority(priority: TicketPriority) -> Self {
        match priority {
            TicketPriority::High => UrgencyLevel::High,
            _ => UrgencyLevel::Medium,
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrgencyLevel::Medium => write!(f, "medium"),
            UrgencyLevel::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Completed,
    Resolved,
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationStatus::Completed => write!(f, "completed"),
            OperationStatus::Resolved => write!(f, "resolved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_id_prefix_and_uniqueness() {
        let a = operation_id("fin");
        let b = operation_id("fin");
        assert!(a.starts_with("fin_"));
        assert_eq!(a.len(), "fin_".len() + 32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_ticket_id_prefix() {
        let id = ticket_id();
        assert!(id.starts_with("TICKET-"));
    }

    #[test]
    fn test_financial_operation_type_fromstr() {
        assert_eq!(
            "invoice_processing".parse::<FinancialOperationType>().unwrap(),
            FinancialOperationType::InvoiceProcessing
        );
        assert!("crypto_trading".parse::<FinancialOperationType>().is_err());
    }

    #[test]
    fn test_hr_operation_type_fromstr() {
        assert_eq!(
            "payroll_processing".parse::<HrOperationType>().unwrap(),
            HrOperationType::PayrollProcessing
        );
        assert!("onboarding".parse::<HrOperationType>().is_err());
    }

    #[test]
    fn test_urgency_follows_priority() {
        assert_eq!(
            UrgencyLevel::from_priority(TicketPriority::High),
            UrgencyLevel::High
        );
        assert_eq!(
            UrgencyLevel::from_priority(TicketPriority::Medium),
            UrgencyLevel::Medium
        );
        assert_eq!(
            UrgencyLevel::from_priority(TicketPriority::Low),
            UrgencyLevel::Medium
        );
    }

    #[test]
    fn test_default_priority_is_medium() {
        assert_eq!(TicketPriority::default(), TicketPriority::Medium);
    }
}
