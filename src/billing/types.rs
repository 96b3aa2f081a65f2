//! Cost-management query wire types.

use crate::query::{CostQuery, Granularity};
use crate::series::{ColumnLayout, MalformedCostRowError, RawCostRow};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a `Microsoft.CostManagement/query` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDefinition {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub timeframe: &'static str,
    pub time_period: TimePeriod,
    pub dataset: Dataset,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimePeriod {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub granularity: Granularity,
    pub aggregation: Aggregations,
    /// Omitted entirely when there is nothing to filter on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Aggregations {
    #[serde(rename = "totalCost")]
    pub total_cost: Aggregation,
}

#[derive(Debug, Clone, Serialize)]
pub struct Aggregation {
    pub name: &'static str,
    pub function: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Filter {
    pub dimensions: DimensionFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionFilter {
    pub name: &'static str,
    pub operator: &'static str,
    pub values: Vec<String>,
}

impl From<&CostQuery> for QueryDefinition {
    fn from(query: &CostQuery) -> Self {
        let filter = query.has_filter().then(|| Filter {
            dimensions: DimensionFilter {
                name: "ResourceGroupName",
                operator: "In",
                values: query.resource_groups().iter().cloned().collect(),
            },
        });

        Self {
            kind: "Usage",
            timeframe: "Custom",
            time_period: TimePeriod {
                from: query.start_date().format("%Y-%m-%d").to_string(),
                to: query.end_date().format("%Y-%m-%d").to_string(),
            },
            dataset: Dataset {
                granularity: query.granularity(),
                aggregation: Aggregations {
                    total_cost: Aggregation {
                        name: "Cost",
                        function: "Sum",
                    },
                },
                filter,
            },
        }
    }
}

/// Response of a cost query. Only the fields the bot reads are modelled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CostQueryResponse {
    #[serde(default)]
    pub properties: Option<QueryProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryProperties {
    #[serde(default)]
    pub rows: Option<Vec<Value>>,
    #[serde(default)]
    pub columns: Option<Vec<Column>>,
    /// Set when the API truncated the result; not followed
    #[serde(default)]
    pub next_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Column {
    pub name: String,
}

impl CostQueryResponse {
    /// Raw JSON rows; absent `properties` or `rows` means no rows.
    pub fn raw_rows(&self) -> &[Value] {
        self.properties
            .as_ref()
            .and_then(|p| p.rows.as_deref())
            .unwrap_or(&[])
    }

    pub fn next_link(&self) -> Option<&str> {
        self.properties.as_ref()?.next_link.as_deref()
    }

    /// Where cost, date and currency sit in each row, from the reported columns.
    pub fn column_layout(&self) -> ColumnLayout {
        let columns = self
            .properties
            .as_ref()
            .and_then(|p| p.columns.as_deref())
            .unwrap_or(&[]);
        ColumnLayout::from_names(columns.iter().map(|c| c.name.as_str()))
    }

    /// Decode every row using [`column_layout`](Self::column_layout).
    pub fn cost_rows(&self) -> Result<Vec<RawCostRow>, MalformedCostRowError> {
        let layout = self.column_layout();
        self.raw_rows()
            .iter()
            .enumerate()
            .map(|(index, row)| RawCostRow::from_json_with(index, row, &layout))
            .collect()
    }
}
