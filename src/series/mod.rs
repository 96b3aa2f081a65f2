//! Cost series construction.
//!
//! Turns the raw `[cost, date, ...]` rows returned by the cost-management API
//! into a chronologically ordered [`CostSeries`], optionally summed into
//! calendar-month buckets.
//!
//! # Example
//!
//! ```
//! use costbot::query::Granularity;
//! use costbot::series::{build_series, RawCostRow};
//! use serde_json::json;
//!
//! let rows: Vec<RawCostRow> = [
//!     json!([100, "2023-01-05"]),
//!     json!([50, "2023-01-20"]),
//!     json!([30, "2023-02-10"]),
//! ]
//! .iter()
//! .enumerate()
//! .map(|(i, v)| RawCostRow::from_json(i, v).unwrap())
//! .collect();
//!
//! let series = build_series(&rows, Granularity::Monthly).unwrap();
//! assert_eq!(series.len(), 2);
//! assert_eq!(series.entries()[0].cost.to_string(), "150");
//! ```

mod error;
mod render;
mod row;

pub use error::MalformedCostRowError;
pub use render::{format_cost, render_series};
pub use row::{ColumnLayout, RawCostRow, RawDate};

use crate::query::Granularity;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// One point of a cost series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostEntry {
    /// Row date for daily series, last day of the month for monthly series.
    pub date: NaiveDate,
    pub cost: Decimal,
}

/// Chronologically ordered costs for a single query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostSeries {
    granularity: Granularity,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
    entries: Vec<CostEntry>,
    total: Decimal,
}

impl CostSeries {
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Currency shared by every input row, if the rows carried one.
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn entries(&self) -> &[CostEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every entry, checked when the series was built.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Display label for an entry: `YYYY-MM-DD` for daily, `YYYY-MM` for monthly.
    pub fn label(&self, entry: &CostEntry) -> String {
        match self.granularity {
            Granularity::Daily => entry.date.format("%Y-%m-%d").to_string(),
            Granularity::Monthly => entry.date.format("%Y-%m").to_string(),
        }
    }
}

/// Build a cost series from raw billing rows.
///
/// Rows are stably sorted by date. Daily keeps every row (duplicate dates
/// included); Monthly sums costs per calendar month and labels each bucket by
/// the month's last day. Any unparseable date fails the whole build, as does
/// a sum that leaves the `Decimal` range.
pub fn build_series(
    rows: &[RawCostRow],
    granularity: Granularity,
) -> Result<CostSeries, MalformedCostRowError> {
    let mut dated = rows
        .iter()
        .map(|row| Ok((row.index, row.parse_date()?, row.cost)))
        .collect::<Result<Vec<_>, MalformedCostRowError>>()?;

    // sort_by_key is stable: ties keep input order
    dated.sort_by_key(|(_, date, _)| *date);

    let total = dated.iter().try_fold(Decimal::ZERO, |sum, (index, _, cost)| {
        sum.checked_add(*cost)
            .ok_or(MalformedCostRowError::Overflow { index: *index })
    })?;

    let entries = match granularity {
        Granularity::Daily => dated
            .into_iter()
            .map(|(_, date, cost)| CostEntry { date, cost })
            .collect(),
        Granularity::Monthly => sum_by_month(dated)?,
    };

    Ok(CostSeries {
        granularity,
        currency: common_currency(rows),
        entries,
        total,
    })
}

/// Collapse date-sorted `(index, date, cost)` rows into one entry per calendar month.
fn sum_by_month(
    sorted: Vec<(usize, NaiveDate, Decimal)>,
) -> Result<Vec<CostEntry>, MalformedCostRowError> {
    let mut buckets: Vec<CostEntry> = Vec::new();

    for (index, date, cost) in sorted {
        let period_end = month_end(date);
        match buckets.last_mut() {
            Some(last) if last.date == period_end => {
                last.cost = last
                    .cost
                    .checked_add(cost)
                    .ok_or(MalformedCostRowError::Overflow { index })?;
            }
            _ => buckets.push(CostEntry {
                date: period_end,
                cost,
            }),
        }
    }

    Ok(buckets)
}

/// Last calendar day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

fn common_currency(rows: &[RawCostRow]) -> Option<String> {
    let first = rows.first()?.currency.as_deref()?;
    rows.iter()
        .all(|r| r.currency.as_deref() == Some(first))
        .then(|| first.to_string())
}
