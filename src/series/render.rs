//! Text rendering of a cost series for chat replies.

use super::CostSeries;
use comfy_table::{presets::ASCII_MARKDOWN, CellAlignment, Table};
use rust_decimal::Decimal;

/// Format a cost amount with two decimal places.
pub fn format_cost(cost: Decimal) -> String {
    format!("{:.2}", cost.round_dp(2))
}

/// Render the series as a Markdown table followed by a total line.
///
/// Rows appear in series order. An empty series renders a single sentence
/// instead of an empty table.
pub fn render_series(series: &CostSeries) -> String {
    if series.is_empty() {
        return "No cost data was found for this period.".to_string();
    }

    let cost_header = match series.currency() {
        Some(currency) => format!("Cost ({})", currency),
        None => "Cost".to_string(),
    };

    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN);
    table.set_header(vec![date_header(series), cost_header.as_str()]);

    for entry in series.entries() {
        table.add_row(vec![series.label(entry), format_cost(entry.cost)]);
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    let mut total = format!("Total: {}", format_cost(series.total()));
    if let Some(currency) = series.currency() {
        total.push(' ');
        total.push_str(currency);
    }

    format!("{}\n\n{}", table, total)
}

fn date_header(series: &CostSeries) -> &'static str {
    match series.granularity() {
        crate::query::Granularity::Daily => "Date",
        crate::query::Granularity::Monthly => "Month",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Granularity;
    use crate::series::{build_series, RawCostRow};
    use serde_json::json;

    fn series(values: &[serde_json::Value], granularity: Granularity) -> CostSeries {
        let rows: Vec<RawCostRow> = values
            .iter()
            .enumerate()
            .map(|(i, v)| RawCostRow::from_json(i, v).unwrap())
            .collect();
        build_series(&rows, granularity).unwrap()
    }

    #[test]
    fn test_render_empty_series() {
        let s = series(&[], Granularity::Daily);
        assert_eq!(render_series(&s), "No cost data was found for this period.");
    }

    #[test]
    fn test_render_daily_rows_in_order() {
        let s = series(
            &[json!([30, "2023-02-10"]), json!([100.5, "2023-01-05"])],
            Granularity::Daily,
        );
        let text = render_series(&s);

        let first = text.find("2023-01-05").unwrap();
        let second = text.find("2023-02-10").unwrap();
        assert!(first < second);
        assert!(text.contains("100.50"));
        assert!(text.contains("| Date"));
        assert!(text.ends_with("Total: 130.50"));
    }

    #[test]
    fn test_render_monthly_with_currency() {
        let s = series(
            &[
                json!([100, 20230105, "USD"]),
                json!([50, 20230120, "USD"]),
                json!([30, 20230210, "USD"]),
            ],
            Granularity::Monthly,
        );
        let text = render_series(&s);

        assert!(text.contains("Month"));
        assert!(text.contains("Cost (USD)"));
        assert!(text.contains("2023-01"));
        assert!(text.contains("150.00"));
        assert!(text.ends_with("Total: 180.00 USD"));
    }

    #[test]
    fn test_format_cost_rounds() {
        assert_eq!(format_cost(Decimal::new(12346, 3)), "12.35");
        assert_eq!(format_cost(Decimal::new(7, 0)), "7.00");
    }
}
