use analytics::{AggregateRow, MetricsReport};
use rust_decimal::Decimal;
use serde::Serialize;

/// Shown instead of charts and metrics while no sub-category is selected.
pub const NO_SELECTION_PROMPT: &str = "Please select at least one Sub-Category to see the results.";

/// Shown when the dataset offers no category to select.
pub const NO_CATEGORY_PROMPT: &str = "Please select a Category to see the results.";

/// The unfiltered charts: totals per category and sales per month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub record_count: usize,
    /// Sales and profit per category, alphabetical.
    pub category_totals: Vec<AggregateRow>,
    /// Sales per month, chronological.
    pub monthly_sales: Vec<AggregateRow>,
    pub baseline_margin_pct: Decimal,
}

/// Everything rendered for a non-empty selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionReport {
    pub category: String,
    pub sub_categories: Vec<String>,
    /// Sales per month of the selected records, chronological.
    pub monthly_sales: Vec<AggregateRow>,
    pub metrics: MetricsReport,
}

/// What the presentation layer shows after an interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum SelectionView {
    /// The suppressed state: a prompt instead of charts and metrics.
    NoSelection { prompt: String },
    Report(SelectionReport),
}

impl SelectionView {
    pub fn no_selection(prompt: &str) -> Self {
        SelectionView::NoSelection {
            prompt: prompt.to_string(),
        }
    }
}
