use analytics::{AggregateRow, MetricsReport};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use configuration::ReportSettings;
use core_types::{Measure, SalesRecord};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use session::{Overview, SelectionReport, SelectionView};

/// Width of the longest bar in a chart column.
const BAR_WIDTH: usize = 30;

/// Turns pipeline output into terminal tables and text charts.
#[derive(Debug, Clone)]
pub struct Renderer {
    currency_symbol: String,
    decimals: u32,
}

impl Renderer {
    pub fn new(settings: &ReportSettings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            decimals: settings.decimals,
        }
    }

    /// Formats money as `$1,234.56`, with the sign ahead of the symbol.
    pub fn money(&self, value: Decimal) -> String {
        let (negative, digits) = self.fixed(value);
        let sign = if negative { "-" } else { "" };
        format!("{sign}{}{digits}", self.currency_symbol)
    }

    /// Formats a percentage as `12.34%`.
    pub fn percent(&self, value: Decimal) -> String {
        let (negative, digits) = self.fixed(value);
        let sign = if negative { "-" } else { "" };
        format!("{sign}{digits}%")
    }

    /// Formats a percentage delta with an explicit sign, e.g. `+13.33%`.
    pub fn signed_percent(&self, value: Decimal) -> String {
        let (negative, digits) = self.fixed(value);
        let sign = if negative { "-" } else { "+" };
        format!("{sign}{digits}%")
    }

    /// Rounds `value` and groups the integer digits in threes.
    /// Returns whether the rounded value is negative.
    fn fixed(&self, value: Decimal) -> (bool, String) {
        let rounded = value.round_dp(self.decimals);
        let plain = format!("{:.*}", self.decimals as usize, rounded.abs());
        let (int_part, frac_part) = match plain.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (plain.as_str(), None),
        };

        let mut out = group_thousands(int_part);
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }
        (rounded < Decimal::ZERO, out)
    }

    pub fn records_table(&self, records: &[SalesRecord], limit: usize) -> Table {
        let mut table = new_table(vec!["Order Date", "Category", "Sub-Category", "Sales", "Profit"]);
        for record in records.iter().take(limit) {
            table.add_row(vec![
                Cell::new(record.order_date.format("%Y-%m-%d")),
                Cell::new(&record.category),
                Cell::new(&record.sub_category),
                right(self.money(record.sales)),
                right(self.money(record.profit)),
            ]);
        }
        table
    }

    /// One row per group with a column per measure, plus a bar chart of the first measure.
    pub fn aggregate_table(&self, key_header: &str, rows: &[AggregateRow], measures: &[Measure]) -> Table {
        let mut header = vec![key_header.to_string()];
        header.extend(measures.iter().map(|m| m.label().to_string()));
        header.push(String::new());
        let mut table = new_table(header);

        let charted = measures.first().copied().unwrap_or(Measure::Sales);
        let max = rows
            .iter()
            .map(|r| r.sum(charted))
            .max()
            .unwrap_or(Decimal::ZERO);

        for row in rows {
            let mut cells = vec![Cell::new(&row.key)];
            cells.extend(measures.iter().map(|m| right(self.money(row.sum(*m)))));
            cells.push(Cell::new(bar(row.sum(charted), max)));
            table.add_row(cells);
        }
        table
    }

    pub fn metrics_table(&self, metrics: &MetricsReport) -> Table {
        let mut table = new_table(vec!["Metric", "Value", "Delta"]);
        table.add_row(vec![
            Cell::new("Total Sales"),
            right(self.money(metrics.total_sales)),
            Cell::new(""),
        ]);
        table.add_row(vec![
            Cell::new("Total Profit"),
            right(self.money(metrics.total_profit)),
            Cell::new(""),
        ]);
        table.add_row(vec![
            Cell::new("Overall Profit Margin"),
            right(self.percent(metrics.profit_margin_pct)),
            Cell::new(""),
        ]);
        table.add_row(vec![
            Cell::new("Overall Profit Margin with Delta"),
            right(self.percent(metrics.profit_margin_pct)),
            right(self.signed_percent(metrics.delta_margin_pct)),
        ]);
        table
    }

    pub fn overview(&self, records: &[SalesRecord], overview: &Overview, limit: usize) -> String {
        let mut out = format!(
            "Input Data ({} records)\n{}\n",
            overview.record_count,
            self.records_table(records, limit)
        );
        if overview.record_count > limit {
            out.push_str(&format!("... {} more rows\n", overview.record_count - limit));
        }
        out.push_str(&format!(
            "\nSales by Category\n{}\n\nSales by Month\n{}\n\nOverall profit margin: {}",
            self.aggregate_table("Category", &overview.category_totals, &[Measure::Sales, Measure::Profit]),
            self.aggregate_table("Month", &overview.monthly_sales, &[Measure::Sales]),
            self.percent(overview.baseline_margin_pct)
        ));
        out
    }

    pub fn selection_view(&self, view: &SelectionView) -> String {
        match view {
            SelectionView::NoSelection { prompt } => prompt.clone(),
            SelectionView::Report(report) => self.selection_report(report),
        }
    }

    fn selection_report(&self, report: &SelectionReport) -> String {
        format!(
            "{} / {} ({} records)\n\nSales by Month\n{}\n\n{}",
            report.category,
            report.sub_categories.join(", "),
            report.metrics.record_count,
            self.aggregate_table("Month", &report.monthly_sales, &[Measure::Sales]),
            self.metrics_table(&report.metrics)
        )
    }
}

fn new_table<T: Into<Cell>>(header: Vec<T>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// A horizontal bar scaled against `max`. Non-positive values draw nothing.
fn bar(value: Decimal, max: Decimal) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }
    let width = (value / max * Decimal::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0)
        .max(1);
    "█".repeat(width)
}
