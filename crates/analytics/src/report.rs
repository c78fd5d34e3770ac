use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The derived metrics for one selection of records.
///
/// This struct is the final output of the `MetricsEngine` and is what the
/// presentation layer renders as metric widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub record_count: usize,
    pub total_sales: Decimal,
    pub total_profit: Decimal,
    /// `100 * total_profit / total_sales`, or zero when there are no sales.
    pub profit_margin_pct: Decimal,
    /// The margin over the entire unfiltered dataset.
    pub baseline_margin_pct: Decimal,
    /// `profit_margin_pct - baseline_margin_pct`; signed.
    pub delta_margin_pct: Decimal,
}
