use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::integration::{IntegrationConfig, integration_id};

use super::OpsdeskEngine;

#[derive(Debug, Clone, Deserialize)]
pub struct IntegrationSetupRequest {
    pub system_name: String,
    pub api_base_url: String,
    pub authentication_type: String,
    pub credentials: serde_json::Value,
    pub endpoints: std::collections::HashMap<String, String>,
    pub sync_settings: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntegrationSetupResponse {
    pub status: &'static str,
    pub message: String,
    pub integration: IntegrationConfig,
    pub next_steps: Vec<&'static str>,
}

/// Create-or-replace: a repeated setup with the same normalized system name
/// overwrites the previous configuration, in memory and in the store.
pub async fn execute(
    engine: &OpsdeskEngine,
    request: IntegrationSetupRequest,
) -> Result<IntegrationSetupResponse> {
    let integration_id = integration_id(&request.system_name);

    let config = IntegrationConfig {
        integration_id: integration_id.clone(),
        system_name: request.system_name,
        api_base_url: request.api_base_url,
        authentication_type: request.authentication_type,
        status: "active".to_string(),
        setup_time: Utc::now().to_rfc3339(),
        health_check_passed: true,
        sync_frequency: request
            .sync_settings
            .get("frequency")
            .and_then(|v| v.as_str())
            .unwrap_or("hourly")
            .to_string(),
        last_sync: None,
        total_records_synced: 0,
    };

    // This is the one synchronous store write in a request cycle; a failure
    // here is a setup failure, and the in-memory map stays untouched.
    engine.storage.upsert_integration(&config).await?;

    engine
        .integrations
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .insert(integration_id, config.clone());

    Ok(IntegrationSetupResponse {
        status: "success",
        message: format!(
            "API integration for {} configured successfully",
            config.system_name
        ),
        integration: config,
        next_steps: vec![
            "Test connection established",
            "Data mapping configured",
            "Sync schedule activated",
            "Monitoring enabled",
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;
    use serde_json::json;
    use std::sync::Arc;

    fn request(system_name: &str, url: &str) -> IntegrationSetupRequest {
        IntegrationSetupRequest {
            system_name: system_name.to_string(),
            api_base_url: url.to_string(),
            authentication_type: "oauth2".to_string(),
            credentials: json!({"client_id": "abc"}),
            endpoints: [("contacts".to_string(), "/v1/contacts".to_string())].into(),
            sync_settings: json!({"frequency": "daily"}),
        }
    }

    #[tokio::test]
    async fn test_setup_derives_id_and_sync_frequency() {
        let storage = Arc::new(MemoryStorage::new());
        let engine = OpsdeskEngine::new(storage.clone());

        let response = execute(&engine, request("Sales Force", "https://a.example"))
            .await
            .unwrap();

        assert_eq!(response.status, "success");
        assert_eq!(response.integration.integration_id, "api_sales_force");
        assert_eq!(response.integration.sync_frequency, "daily");
        assert_eq!(response.integration.total_records_synced, 0);
        assert!(response.integration.last_sync.is_none());
        assert_eq!(response.next_steps.len(), 4);

        assert_eq!(engine.integrations_count(), 1);
        assert_eq!(storage.integrations().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_frequency_defaults_to_hourly() {
        let engine = OpsdeskEngine::new(Arc::new(MemoryStorage::new()));
        let mut req = request("CRM", "https://a.example");
        req.sync_settings = json!({});
        let response = execute(&engine, req).await.unwrap();
        assert_eq!(response.integration.sync_frequency, "hourly");
    }

    #[tokio::test]
    async fn test_same_name_overwrites() {
        let storage = Arc::new(MemoryStorage::new());
        let engine = OpsdeskEngine::new(storage.clone());

        let first = execute(&engine, request("Sales Force", "https://a.example"))
            .await
            .unwrap();
        let second = execute(&engine, request("sales force", "https://b.example"))
            .await
            .unwrap();

        assert_eq!(
            first.integration.integration_id,
            second.integration.integration_id
        );
        assert_eq!(engine.integrations_count(), 1);

        let stored = engine.integrations_snapshot();
        assert_eq!(stored["api_sales_force"].api_base_url, "https://b.example");
        assert_eq!(
            storage.integrations()["api_sales_force"].api_base_url,
            "https://b.example"
        );
    }

    #[tokio::test]
    async fn test_storage_failure_is_a_setup_failure() {
        let storage = Arc::new(crate::storage::UnconfiguredStorage::new(
            "OPSDESK_DATABASE_URL",
        ));
        let engine = OpsdeskEngine::new(storage);

        let result = execute(&engine, request("CRM", "https://a.example")).await;
        assert!(result.is_err());
        assert_eq!(engine.integrations_count(), 0);
    }
}
