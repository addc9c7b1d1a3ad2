use opsdesk_core::error::{Error, Result};

/// Create the five record-store tables if absent. Safe to run on every
/// startup; there is no versioning and no migration history.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<()> {
    // 1. financial_operations
    sqlx::query(
        r#"
CREATE TABLE IF NOT EXISTS financial_operations (
    operation_id VARCHAR PRIMARY KEY,
    operation_type VARCHAR NOT NULL,
    status VARCHAR NOT NULL,
    amount DOUBLE PRECISION,
    category VARCHAR,
    processed_by VARCHAR NOT NULL,
    accuracy_confidence DOUBLE PRECISION NOT NULL,
    created_at VARCHAR NOT NULL,
    metadata JSONB
)
"#,
    )
    .execute(pool)
    .await
    .map_err(|e| Error::Storage(format!("create financial_operations: {e}")))?;

    // 2. hr_operations
    sqlx::query(
        r#"
CREATE TABLE IF NOT EXISTS hr_operations (
    operation_id VARCHAR PRIMARY KEY,
    operation_type VARCHAR NOT NULL,
    status VARCHAR NOT NULL,
    employee_id VARCHAR,
    department VARCHAR,
    processed_by VARCHAR NOT NULL,
    accuracy_confidence DOUBLE PRECISION NOT NULL,
    created_at VARCHAR NOT NULL,
    metadata JSONB
)
"#,
    )
    .execute(pool)
    .await
    .map_err(|e| Error::Storage(format!("create hr_operations: {e}")))?;

    // 3. support_tickets
    sqlx::query(
        r#"
CREATE TABLE IF NOT EXISTS support_tickets (
    ticket_id VARCHAR PRIMARY KEY,
    customer_id VARCHAR NOT NULL,
    issue_type VARCHAR NOT NULL,
    priority VARCHAR NOT NULL,
    status VARCHAR NOT NULL,
    urgency_level VARCHAR NOT NULL,
    sentiment_score DOUBLE PRECISION NOT NULL,
    satisfaction_predicted DOUBLE PRECISION NOT NULL,
    processed_by VARCHAR NOT NULL,
    created_at VARCHAR NOT NULL,
    metadata JSONB
)
"#,
    )
    .execute(pool)
    .await
    .map_err(|e| Error::Storage(format!("create support_tickets: {e}")))?;

    // 4. api_integrations
    sqlx::query(
        r#"
CREATE TABLE IF NOT EXISTS api_integrations (
    integration_id VARCHAR PRIMARY KEY,
    system_name VARCHAR NOT NULL,
    api_base_url VARCHAR NOT NULL,
    authentication_type VARCHAR NOT NULL,
    status VARCHAR NOT NULL,
    setup_time VARCHAR NOT NULL,
    health_check_passed BOOLEAN NOT NULL DEFAULT TRUE,
    sync_frequency VARCHAR NOT NULL,
    last_sync VARCHAR,
    total_records_synced BIGINT NOT NULL DEFAULT 0
)
"#,
    )
    .execute(pool)
    .await
    .map_err(|e| Error::Storage(format!("create api_integrations: {e}")))?;

    // 5. system_metrics
    sqlx::query(
        r#"
CREATE TABLE IF NOT EXISTS system_metrics (
    id UUID PRIMARY KEY,
    captured_at VARCHAR NOT NULL,
    total_operations BIGINT NOT NULL,
    operations_by_agent JSONB,
    total_agents INTEGER NOT NULL,
    active_agents INTEGER NOT NULL,
    average_accuracy DOUBLE PRECISION NOT NULL,
    integrations_configured BIGINT NOT NULL
)
"#,
    )
    .execute(pool)
    .await
    .map_err(|e| Error::Storage(format!("create system_metrics: {e}")))?;

    tracing::info!("record store schema ready");
    Ok(())
}
