use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use opsdesk_core::error::Error as CoreError;
use opsdesk_core::model::agent::Agent;
use opsdesk_core::model::integration::IntegrationConfig;
use opsdesk_core::ops::OpsdeskEngine;
use opsdesk_core::ops::analytics::OperationsAnalytics;
use opsdesk_core::ops::financial::{FinancialOperationRequest, FinancialOperationResponse};
use opsdesk_core::ops::health::HealthReport;
use opsdesk_core::ops::hr::{HrOperationRequest, HrOperationResponse};
use opsdesk_core::ops::integration::{IntegrationSetupRequest, IntegrationSetupResponse};
use opsdesk_core::ops::status::{RootInfo, StatusResponse};
use opsdesk_core::ops::support::{SupportTicketRequest, SupportTicketResponse};

type AppState = Arc<OpsdeskEngine>;

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

pub struct AppError(CoreError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self.0 {
            CoreError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
            other => {
                tracing::error!("internal error: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        AppError(e)
    }
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AgentsResponse {
    pub agents: Vec<Agent>,
}

#[derive(Debug, Serialize)]
pub struct IntegrationsResponse {
    pub integrations: BTreeMap<String, IntegrationConfig>,
    pub total_integrations: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET / -- greeting, agent taglines, and the advertised uptime.
pub async fn root_handler(State(engine): State<AppState>) -> Json<RootInfo> {
    Json(engine.root_info())
}

/// GET /health -- per-agent health plus any accuracy issues.
pub async fn health_handler(State(engine): State<AppState>) -> Json<HealthReport> {
    Json(engine.health_check())
}

/// GET /status -- full system/performance/integration-count view.
pub async fn status_handler(State(engine): State<AppState>) -> Json<StatusResponse> {
    Json(engine.system_status())
}

/// GET /agents -- the fixed registry, in stable order.
pub async fn agents_handler(State(engine): State<AppState>) -> Json<AgentsResponse> {
    Json(AgentsResponse {
        agents: engine.registry.snapshot(),
    })
}

/// POST /financial/process
pub async fn financial_handler(
    State(engine): State<AppState>,
    Json(request): Json<FinancialOperationRequest>,
) -> Json<FinancialOperationResponse> {
    Json(engine.process_financial(request))
}

/// POST /hr/process
pub async fn hr_handler(
    State(engine): State<AppState>,
    Json(request): Json<HrOperationRequest>,
) -> Json<HrOperationResponse> {
    Json(engine.process_hr(request))
}

/// POST /support/ticket
pub async fn support_ticket_handler(
    State(engine): State<AppState>,
    Json(request): Json<SupportTicketRequest>,
) -> Json<SupportTicketResponse> {
    Json(engine.process_support_ticket(request))
}

/// POST /integrations/api -- create or replace an integration.
pub async fn integration_setup_handler(
    State(engine): State<AppState>,
    Json(request): Json<IntegrationSetupRequest>,
) -> Result<Json<IntegrationSetupResponse>, AppError> {
    let response = engine.setup_integration(request).await?;
    Ok(Json(response))
}

/// GET /integrations -- all stored integration configs.
pub async fn integrations_handler(State(engine): State<AppState>) -> Json<IntegrationsResponse> {
    let integrations = engine.integrations_snapshot();
    let total_integrations = integrations.len();
    Json(IntegrationsResponse {
        integrations,
        total_integrations,
    })
}

/// GET /analytics/operations -- aggregates plus the fixed claims.
pub async fn analytics_handler(State(engine): State<AppState>) -> Json<OperationsAnalytics> {
    Json(engine.operations_analytics())
}
