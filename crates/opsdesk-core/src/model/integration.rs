use serde::{Deserialize, Serialize};

/// Derive the integration id from the system name: lowercased, spaces
/// replaced with underscores, `api_` prefix. Two setups with the same
/// normalized name share an id (create-or-replace).
pub fn integration_id(system_name: &str) -> String {
    format!("api_{}", system_name.to_lowercase().replace(' ', "_"))
}

/// Stored description of a third-party API connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntegrationConfig {
    pub integration_id: String,
    pub system_name: String,
    pub api_base_url: String,
    pub authentication_type: String,
    pub status: String,
    pub setup_time: String,
    pub health_check_passed: bool,
    pub sync_frequency: String,
    pub last_sync: Option<String>,
    pub total_records_synced: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integration_id_normalization() {
        assert_eq!(integration_id("Sales Force"), "api_sales_force");
        assert_eq!(integration_id("QuickBooks"), "api_quickbooks");
        assert_eq!(integration_id("My CRM System"), "api_my_crm_system");
    }

    #[test]
    fn test_same_normalized_name_collides() {
        assert_eq!(integration_id("Sales Force"), integration_id("SALES FORCE"));
    }

    #[test]
    fn test_integration_config_serde() {
        let config = IntegrationConfig {
            integration_id: "api_salesforce".to_string(),
            system_name: "Salesforce".to_string(),
            api_base_url: "https://api.salesforce.example".to_string(),
            authentication_type: "oauth2".to_string(),
            status: "active".to_string(),
            setup_time: "2025-01-01T00:00:00Z".to_string(),
            health_check_passed: true,
            sync_frequency: "hourly".to_string(),
            last_sync: None,
            total_records_synced: 0,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: IntegrationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
