//! Cost-management API configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    pub management_url: String,
    /// The one subscription whose costs are queried
    pub subscription_id: String,
    pub api_version: String,
    /// Environment variable holding a bearer token for the management API
    pub token_env: String,
    pub timeout_seconds: u64,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            management_url: "https://management.azure.com".to_string(),
            subscription_id: String::new(),
            api_version: "2021-01-01".to_string(),
            token_env: "AZURE_ACCESS_TOKEN".to_string(),
            timeout_seconds: 60,
        }
    }
}

impl BillingConfig {
    /// Full URL of the subscription-scoped cost query endpoint.
    pub fn query_url(&self) -> String {
        format!(
            "{}/subscriptions/{}/providers/Microsoft.CostManagement/query?api-version={}",
            self.management_url.trim_end_matches('/'),
            self.subscription_id,
            self.api_version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_url() {
        let config = BillingConfig {
            management_url: "https://management.azure.com/".to_string(),
            subscription_id: "0000-1111".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.query_url(),
            "https://management.azure.com/subscriptions/0000-1111/providers/Microsoft.CostManagement/query?api-version=2021-01-01"
        );
    }
}
