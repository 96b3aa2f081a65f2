//! Cost data fetching.
//!
//! One authenticated `Microsoft.CostManagement/query` call per [`CostQuery`],
//! scoped to the single configured subscription.

use async_trait::async_trait;

pub mod cost_management;
pub mod credential;
pub mod error;
pub mod types;

pub use cost_management::CostManagementClient;
pub use credential::{EnvTokenProvider, StaticTokenProvider, TokenProvider};
pub use error::CostDataFetchError;
pub use types::{CostQueryResponse, QueryDefinition};

use crate::query::CostQuery;

/// Anything that can answer a cost query with billing rows.
#[async_trait]
pub trait CostSource: Send + Sync + 'static {
    /// Issue exactly one request for `query`. Not retried.
    async fn query_costs(&self, query: &CostQuery) -> Result<CostQueryResponse, CostDataFetchError>;
}
