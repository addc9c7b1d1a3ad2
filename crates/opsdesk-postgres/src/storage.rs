use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;

use opsdesk_core::error::{Error, Result};
use opsdesk_core::model::integration::IntegrationConfig;
use opsdesk_core::model::metrics::MetricsSnapshot;
use opsdesk_core::storage::{ColumnValues, OperationRecord, StorageBackend};

/// PostgreSQL-backed record store.
///
/// Wraps a lazily-connected `sqlx::PgPool`: constructing the storage never
/// touches the network, and every statement acquires and releases a pooled
/// connection on its own, including on error paths.
pub struct PgStorage {
    pool: sqlx::PgPool,
}

impl PgStorage {
    /// Build the pool without attempting a connection. `url` is a standard
    /// `postgres://` connection string.
    pub fn connect_lazy(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .connect_lazy(url)
            .map_err(|e| Error::Storage(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Build a `PgStorage` from an existing pool (useful for tests).
    pub fn from_pool(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// Create the record-store tables if absent. Safe to call on every
    /// startup; a failure leaves the process serving without guaranteed
    /// persistence.
    pub async fn ensure_schema(&self) -> Result<()> {
        crate::migrations::run_migrations(&self.pool).await
    }

    /// Build and run one parameterized insert from an ordered column
    /// mapping. Table and column names come from the record types, never
    /// from request input.
    async fn insert_mapped(&self, table: &str, columns: ColumnValues) -> Result<()> {
        let columns: Vec<(&str, Value)> =
            columns.into_iter().filter(|(_, v)| !v.is_null()).collect();

        let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            names.join(", "),
            placeholders.join(", ")
        );

        let mut query = sqlx::query(&sql);
        for (_, value) in columns {
            query = match value {
                Value::String(s) => query.bind(s),
                Value::Bool(b) => query.bind(b),
                Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        query.bind(i)
                    } else {
                        query.bind(n.as_f64().unwrap_or(0.0))
                    }
                }
                // Objects and arrays land in JSONB columns.
                other => query.bind(other),
            };
        }

        query.execute(&self.pool).await.map_err(map_sqlx)?;
        Ok(())
    }
}

fn map_sqlx(e: sqlx::Error) -> Error {
    Error::Storage(e.to_string())
}

#[async_trait]
impl StorageBackend for PgStorage {
    async fn insert_operation(&self, record: &OperationRecord) -> Result<()> {
        self.insert_mapped(record.table(), record.columns()).await
    }

    async fn upsert_integration(&self, config: &IntegrationConfig) -> Result<()> {
        sqlx::query(
            r#"
INSERT INTO api_integrations (
    integration_id, system_name, api_base_url, authentication_type,
    status, setup_time, health_check_passed, sync_frequency,
    last_sync, total_records_synced
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
ON CONFLICT (integration_id) DO UPDATE SET
    system_name = EXCLUDED.system_name,
    api_base_url = EXCLUDED.api_base_url,
    authentication_type = EXCLUDED.authentication_type,
    status = EXCLUDED.status,
    setup_time = EXCLUDED.setup_time,
    health_check_passed = EXCLUDED.health_check_passed,
    sync_frequency = EXCLUDED.sync_frequency,
    last_sync = EXCLUDED.last_sync,
    total_records_synced = EXCLUDED.total_records_synced
"#,
        )
        .bind(&config.integration_id)
        .bind(&config.system_name)
        .bind(&config.api_base_url)
        .bind(&config.authentication_type)
        .bind(&config.status)
        .bind(&config.setup_time)
        .bind(config.health_check_passed)
        .bind(&config.sync_frequency)
        .bind(&config.last_sync)
        .bind(config.total_records_synced as i64)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }

    async fn insert_metrics_snapshot(&self, snapshot: &MetricsSnapshot) -> Result<()> {
        sqlx::query(
            r#"
INSERT INTO system_metrics (
    id, captured_at, total_operations, operations_by_agent,
    total_agents, active_agents, average_accuracy, integrations_configured
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
"#,
        )
        .bind(snapshot.id)
        .bind(&snapshot.captured_at)
        .bind(snapshot.total_operations as i64)
        .bind(&snapshot.operations_by_agent)
        .bind(snapshot.total_agents as i32)
        .bind(snapshot.active_agents as i32)
        .bind(snapshot.average_accuracy)
        .bind(snapshot.integrations_configured as i64)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }
}
