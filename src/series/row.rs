//! Raw billing rows as returned by the cost-management query API.

use super::MalformedCostRowError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Date column exactly as the billing API sent it.
///
/// Daily queries report `UsageDate` as an integer such as `20230105`; monthly
/// queries report `BillingMonth` as `2023-01-01T00:00:00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawDate {
    Number(i64),
    Text(String),
}

impl fmt::Display for RawDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawDate::Number(n) => write!(f, "{}", n),
            RawDate::Text(s) => f.write_str(s),
        }
    }
}

impl RawDate {
    /// Parse into a calendar date. Time-of-day and offsets are discarded.
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            RawDate::Number(n) => parse_compact(&n.to_string()),
            RawDate::Text(s) => parse_text(s.trim()),
        }
    }
}

fn parse_compact(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = s[0..4].parse().ok()?;
    let month = s[4..6].parse().ok()?;
    let day = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_text(s: &str) -> Option<NaiveDate> {
    if let Some(date) = parse_compact(s) {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Positions of the cost, date and currency columns within a row.
///
/// The default is `[cost, date, currency]`, the order the query API uses when
/// no grouping is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub cost: usize,
    pub date: usize,
    pub currency: Option<usize>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            cost: 0,
            date: 1,
            currency: Some(2),
        }
    }
}

impl ColumnLayout {
    /// Locate columns by the names the API reports (`PreTaxCost`, `Cost`,
    /// `UsageDate`, `BillingMonth`, `Currency`).
    ///
    /// Falls back to the default positions unless both a cost and a date
    /// column are named.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<String> = names.into_iter().map(str::to_ascii_lowercase).collect();

        let cost = position(&names, |n| n.contains("cost"));
        let date = position(&names, |n| n == "billingmonth" || n.contains("date"));
        match (cost, date) {
            (Some(cost), Some(date)) if cost != date => Self {
                cost,
                date,
                currency: position(&names, |n| n == "currency"),
            },
            _ => Self::default(),
        }
    }

    fn min_len(&self) -> usize {
        self.cost.max(self.date) + 1
    }
}

fn position(names: &[String], pred: impl Fn(&str) -> bool) -> Option<usize> {
    names.iter().position(|n| pred(n.as_str()))
}

/// One `[cost, date, ...]` row from a billing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCostRow {
    /// Position in the billing response, used in error reports.
    pub index: usize,
    pub cost: Decimal,
    pub date: RawDate,
    /// Currency column when present and a string, e.g. `"USD"`.
    pub currency: Option<String>,
}

impl RawCostRow {
    /// Decode a JSON row laid out as `[cost, date, currency?]`.
    pub fn from_json(index: usize, value: &Value) -> Result<Self, MalformedCostRowError> {
        Self::from_json_with(index, value, &ColumnLayout::default())
    }

    /// Decode a JSON row using `layout`. Cost must be numeric (or a numeric
    /// string); the date is kept raw and only parsed when the series is built.
    pub fn from_json_with(
        index: usize,
        value: &Value,
        layout: &ColumnLayout,
    ) -> Result<Self, MalformedCostRowError> {
        let columns = match value.as_array() {
            Some(cols) if cols.len() >= layout.min_len() => cols,
            _ => {
                return Err(MalformedCostRowError::Shape {
                    index,
                    found: value.to_string(),
                })
            }
        };

        let raw_cost = &columns[layout.cost];
        let cost = parse_cost(raw_cost).ok_or_else(|| MalformedCostRowError::Cost {
            index,
            value: raw_cost.to_string(),
        })?;

        let date = match &columns[layout.date] {
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawDate::Number(i),
                None => RawDate::Text(n.to_string()),
            },
            Value::String(s) => RawDate::Text(s.clone()),
            other => RawDate::Text(other.to_string()),
        };

        let currency = layout
            .currency
            .and_then(|i| columns.get(i))
            .and_then(Value::as_str)
            .map(|s| s.to_string());

        Ok(Self {
            index,
            cost,
            date,
            currency,
        })
    }

    pub fn parse_date(&self) -> Result<NaiveDate, MalformedCostRowError> {
        self.date
            .to_date()
            .ok_or_else(|| MalformedCostRowError::Date {
                index: self.index,
                value: self.date.to_string(),
            })
    }
}

fn parse_cost(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_usage_date_integer() {
        assert_eq!(RawDate::Number(20230105).to_date(), Some(date("2023-01-05")));
        assert_eq!(RawDate::Number(20231345).to_date(), None);
        assert_eq!(RawDate::Number(2023).to_date(), None);
    }

    #[test]
    fn test_parse_text_forms() {
        let expected = Some(date("2023-01-05"));
        assert_eq!(RawDate::Text("20230105".into()).to_date(), expected);
        assert_eq!(RawDate::Text("2023-01-05".into()).to_date(), expected);
        assert_eq!(RawDate::Text("2023-01-05T00:00:00".into()).to_date(), expected);
        assert_eq!(RawDate::Text("2023-01-05T10:30:00Z".into()).to_date(), expected);
        assert_eq!(RawDate::Text(" 2023-01-05 ".into()).to_date(), expected);
    }

    #[test]
    fn test_parse_text_rejects_garbage() {
        assert_eq!(RawDate::Text("yesterday".into()).to_date(), None);
        assert_eq!(RawDate::Text("2023-02-30".into()).to_date(), None);
        assert_eq!(RawDate::Text("".into()).to_date(), None);
    }

    #[test]
    fn test_from_json_daily_row() {
        let row = RawCostRow::from_json(0, &json!([12.34, 20230105, "USD"])).unwrap();
        assert_eq!(row.cost, Decimal::from_str("12.34").unwrap());
        assert_eq!(row.date, RawDate::Number(20230105));
        assert_eq!(row.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_from_json_scientific_cost() {
        let row = RawCostRow::from_json(0, &json!([1.5e-7, "2023-01-05"])).unwrap();
        assert_eq!(row.cost, Decimal::from_str("0.00000015").unwrap());
    }

    #[test]
    fn test_from_json_string_cost() {
        let row = RawCostRow::from_json(0, &json!(["3.50", "2023-01-05"])).unwrap();
        assert_eq!(row.cost, Decimal::from_str("3.5").unwrap());
        assert!(row.currency.is_none());
    }

    #[test]
    fn test_from_json_short_row() {
        let err = RawCostRow::from_json(4, &json!([1.0])).unwrap_err();
        assert!(matches!(err, MalformedCostRowError::Shape { index: 4, .. }));
    }

    #[test]
    fn test_from_json_non_numeric_cost() {
        let err = RawCostRow::from_json(2, &json!([null, 20230101])).unwrap_err();
        assert!(matches!(err, MalformedCostRowError::Cost { index: 2, .. }));
    }

    #[test]
    fn test_layout_from_column_names() {
        let layout = ColumnLayout::from_names(["Currency", "UsageDate", "PreTaxCost"]);
        assert_eq!(
            layout,
            ColumnLayout {
                cost: 2,
                date: 1,
                currency: Some(0),
            }
        );

        let row = RawCostRow::from_json_with(0, &json!(["EUR", 20230105, 4.2]), &layout).unwrap();
        assert_eq!(row.cost, Decimal::from_str("4.2").unwrap());
        assert_eq!(row.date, RawDate::Number(20230105));
        assert_eq!(row.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_layout_billing_month_without_currency() {
        let layout = ColumnLayout::from_names(["BillingMonth", "Cost"]);
        assert_eq!(layout.cost, 1);
        assert_eq!(layout.date, 0);
        assert_eq!(layout.currency, None);

        let err = RawCostRow::from_json_with(3, &json!(["2023-01-01T00:00:00"]), &layout)
            .unwrap_err();
        assert!(matches!(err, MalformedCostRowError::Shape { index: 3, .. }));
    }

    #[test]
    fn test_layout_falls_back_to_positions() {
        assert_eq!(ColumnLayout::from_names(Vec::<&str>::new()), ColumnLayout::default());
        assert_eq!(
            ColumnLayout::from_names(["ResourceGroup", "Currency"]),
            ColumnLayout::default()
        );
    }

    #[test]
    fn test_parse_date_reports_row_index() {
        let row = RawCostRow::from_json(7, &json!([1, "soon"])).unwrap();
        let err = row.parse_date().unwrap_err();
        assert_eq!(err.index(), 7);
        assert!(err.to_string().contains("soon"));
    }
}
