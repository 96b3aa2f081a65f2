//! Structured cost query types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Time bucketing requested for a cost query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Granularity {
    /// One entry per raw row.
    #[default]
    Daily,
    /// Costs summed per calendar month.
    Monthly,
}

impl Granularity {
    /// Wire name used by the cost-management API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "Daily",
            Granularity::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(Granularity::Daily),
            "monthly" | "month" => Ok(Granularity::Monthly),
            _ => Err(format!("Invalid granularity: {}", s)),
        }
    }
}

/// A validated cost query, produced once per inbound message.
///
/// Construction through [`CostQuery::new`] guarantees `start_date <= end_date`.
/// An empty `resource_groups` set means "no filter".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostQuery {
    start_date: NaiveDate,
    end_date: NaiveDate,
    granularity: Granularity,
    resource_groups: BTreeSet<String>,
}

impl CostQuery {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        granularity: Granularity,
        resource_groups: impl IntoIterator<Item = String>,
    ) -> Result<Self, InvalidDateRange> {
        if start_date > end_date {
            return Err(InvalidDateRange {
                start_date,
                end_date,
            });
        }

        let resource_groups = resource_groups
            .into_iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();

        Ok(Self {
            start_date,
            end_date,
            granularity,
            resource_groups,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Resource groups to filter by, in sorted order.
    pub fn resource_groups(&self) -> &BTreeSet<String> {
        &self.resource_groups
    }

    pub fn has_filter(&self) -> bool {
        !self.resource_groups.is_empty()
    }
}

impl fmt::Display for CostQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} costs from {} to {}",
            self.granularity, self.start_date, self.end_date
        )?;
        if self.has_filter() {
            let groups: Vec<&str> = self.resource_groups.iter().map(String::as_str).collect();
            write!(f, " for resource groups {}", groups.join(", "))?;
        }
        Ok(())
    }
}

/// `start_date` was after `end_date`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("start date {start_date} is after end date {end_date}")]
pub struct InvalidDateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
