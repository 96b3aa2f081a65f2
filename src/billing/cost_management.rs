//! Cost-management REST client.

use super::{CostDataFetchError, CostQueryResponse, CostSource, QueryDefinition, TokenProvider};
use crate::config::BillingConfig;
use crate::query::CostQuery;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the subscription-scoped cost query endpoint.
pub struct CostManagementClient {
    query_url: String,
    tokens: Arc<dyn TokenProvider>,
    timeout: Duration,
    client: Arc<Client>,
}

impl CostManagementClient {
    pub fn new(config: &BillingConfig, tokens: Arc<dyn TokenProvider>, client: Arc<Client>) -> Self {
        Self {
            query_url: config.query_url(),
            tokens,
            timeout: Duration::from_secs(config.timeout_seconds),
            client,
        }
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }
}

#[async_trait]
impl CostSource for CostManagementClient {
    async fn query_costs(&self, query: &CostQuery) -> Result<CostQueryResponse, CostDataFetchError> {
        let token = self.tokens.token().await?;
        let body = QueryDefinition::from(query);
        let timeout_ms = self.timeout.as_millis() as u64;

        debug!(
            from = %query.start_date(),
            to = %query.end_date(),
            granularity = %query.granularity(),
            resource_groups = query.resource_groups().len(),
            "Querying cost data"
        );

        let response = self
            .client
            .post(&self.query_url)
            .bearer_auth(token)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| CostDataFetchError::from_send(e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CostDataFetchError::Upstream {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let result: CostQueryResponse = response
            .json()
            .await
            .map_err(|e| CostDataFetchError::InvalidResponse(e.to_string()))?;

        if result.next_link().is_some() {
            warn!(
                rows = result.raw_rows().len(),
                "Cost query result was truncated; only the first page is used"
            );
        }

        Ok(result)
    }
}
