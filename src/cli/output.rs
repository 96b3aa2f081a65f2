//! Output formatting helpers for CLI commands

use crate::bot::CostReport;
use crate::series::format_cost;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

/// Format a report as a terminal table followed by a summary and total
pub fn format_report_table(report: &CostReport) -> String {
    let series = &report.series;
    let summary = report.query.to_string().bold().to_string();

    if series.is_empty() {
        return format!("{}\n{}", summary, "No cost data was found for this period.".yellow());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Period", "Cost"]);

    for entry in series.entries() {
        table.add_row(vec![
            Cell::new(series.label(entry)),
            Cell::new(format_cost(entry.cost)).set_alignment(CellAlignment::Right),
        ]);
    }

    let total = match series.currency() {
        Some(currency) => format!("{} {}", format_cost(series.total()), currency),
        None => format_cost(series.total()),
    };

    format!("{}\n{}\n{} {}", summary, table, "Total:".bold(), total.green())
}

/// Format a report as pretty-printed JSON
pub fn format_report_json(report: &CostReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
