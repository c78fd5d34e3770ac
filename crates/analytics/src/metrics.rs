use crate::error::AnalyticsError;
use crate::report::MetricsReport;
use core_types::SalesRecord;
use rust_decimal::Decimal;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Profit as a percentage of sales.
///
/// Zero sales is not an error: the margin is defined as exactly zero.
pub fn profit_margin(total_sales: Decimal, total_profit: Decimal) -> Result<Decimal, AnalyticsError> {
    if total_sales.is_zero() {
        return Ok(Decimal::ZERO);
    }
    total_profit
        .checked_mul(ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(total_sales))
        .ok_or_else(|| AnalyticsError::Overflow("profit margin".to_string()))
}

/// Sales and profit summed over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesTotals {
    pub record_count: usize,
    pub total_sales: Decimal,
    pub total_profit: Decimal,
}

impl SalesTotals {
    pub fn from_records<'a, I>(records: I) -> Result<Self, AnalyticsError>
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        records.into_iter().try_fold(Self::default(), |acc, record| {
            Ok(Self {
                record_count: acc.record_count + 1,
                total_sales: acc
                    .total_sales
                    .checked_add(record.sales)
                    .ok_or_else(|| AnalyticsError::Overflow("total sales".to_string()))?,
                total_profit: acc
                    .total_profit
                    .checked_add(record.profit)
                    .ok_or_else(|| AnalyticsError::Overflow("total profit".to_string()))?,
            })
        })
    }

    pub fn margin(&self) -> Result<Decimal, AnalyticsError> {
        profit_margin(self.total_sales, self.total_profit)
    }
}

/// A stateless calculator for sales metrics.
#[derive(Debug, Default)]
pub struct MetricsEngine {}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The margin over the entire unfiltered dataset, used as the comparison point.
    pub fn baseline_margin<'a, I>(&self, all_records: I) -> Result<Decimal, AnalyticsError>
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        SalesTotals::from_records(all_records)?.margin()
    }

    /// Computes totals, margin and the margin delta against `baseline_margin_pct`.
    ///
    /// # Arguments
    ///
    /// * `subset` - The filtered records of the current selection.
    /// * `baseline_margin_pct` - The result of `baseline_margin` over all records.
    pub fn calculate<'a, I>(
        &self,
        subset: I,
        baseline_margin_pct: Decimal,
    ) -> Result<MetricsReport, AnalyticsError>
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        let totals = SalesTotals::from_records(subset)?;
        let profit_margin_pct = totals.margin()?;
        let delta_margin_pct = profit_margin_pct
            .checked_sub(baseline_margin_pct)
            .ok_or_else(|| AnalyticsError::Overflow("margin delta".to_string()))?;

        tracing::debug!(
            records = totals.record_count,
            %profit_margin_pct,
            %delta_margin_pct,
            "Calculated selection metrics."
        );

        Ok(MetricsReport {
            record_count: totals.record_count,
            total_sales: totals.total_sales,
            total_profit: totals.total_profit,
            profit_margin_pct,
            baseline_margin_pct,
            delta_margin_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn furniture() -> Vec<SalesRecord> {
        let date = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        vec![
            SalesRecord::new(date, "Furniture", "Chairs", dec!(100), dec!(10)),
            SalesRecord::new(date, "Furniture", "Tables", dec!(200), dec!(-20)),
        ]
    }

    #[test]
    fn margin_is_zero_when_sales_are_zero() {
        assert_eq!(profit_margin(Decimal::ZERO, dec!(-15)).unwrap(), Decimal::ZERO);
        assert_eq!(profit_margin(Decimal::ZERO, Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn empty_subset_reports_zeros() {
        let engine = MetricsEngine::new();
        let report = engine.calculate(std::iter::empty::<&SalesRecord>(), dec!(12.5)).unwrap();
        assert_eq!(report.total_sales, Decimal::ZERO);
        assert_eq!(report.total_profit, Decimal::ZERO);
        assert_eq!(report.profit_margin_pct, Decimal::ZERO);
        assert_eq!(report.delta_margin_pct, dec!(-12.5));
    }

    #[test]
    fn whole_category_metrics() {
        let records = furniture();
        let engine = MetricsEngine::new();
        let baseline = engine.baseline_margin(&records).unwrap();
        let report = engine.calculate(&records, baseline).unwrap();

        assert_eq!(report.record_count, 2);
        assert_eq!(report.total_sales, dec!(300));
        assert_eq!(report.total_profit, dec!(-10));
        assert_eq!(report.profit_margin_pct.round_dp(2), dec!(-3.33));
        assert_eq!(report.delta_margin_pct, Decimal::ZERO);
    }

    #[test]
    fn delta_is_measured_against_baseline() {
        let records = furniture();
        let engine = MetricsEngine::new();
        let baseline = engine.baseline_margin(&records).unwrap();
        let report = engine.calculate(records.iter().take(1), baseline).unwrap();

        assert_eq!(report.profit_margin_pct, dec!(10));
        assert_eq!(report.baseline_margin_pct.round_dp(2), dec!(-3.33));
        assert_eq!(report.delta_margin_pct.round_dp(2), dec!(13.33));
    }
}
