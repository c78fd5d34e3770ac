use crate::error::AnalyticsError;
use core_types::{GroupKey, Measure, SalesRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One grouped-and-summed output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub key: GroupKey,
    /// Number of records that mapped to `key`.
    pub record_count: usize,
    /// Sum per requested measure. Only the requested measures are present.
    pub sums: BTreeMap<Measure, Decimal>,
}

impl AggregateRow {
    fn new(key: GroupKey, measures: &BTreeSet<Measure>) -> Self {
        Self {
            key,
            record_count: 0,
            sums: measures.iter().map(|m| (*m, Decimal::ZERO)).collect(),
        }
    }

    /// The sum for `measure`, or zero if it was not requested.
    pub fn sum(&self, measure: Measure) -> Decimal {
        self.sums.get(&measure).copied().unwrap_or(Decimal::ZERO)
    }
}

/// Groups `records` by `key_fn` and sums each of `measures` per group.
///
/// Rows come back in ascending key order: alphabetical for categories and
/// chronological for months. Only keys observed in the input produce a row,
/// so an empty input yields an empty result.
pub fn aggregate<'a, I, F>(
    records: I,
    key_fn: F,
    measures: &[Measure],
) -> Result<Vec<AggregateRow>, AnalyticsError>
where
    I: IntoIterator<Item = &'a SalesRecord>,
    F: Fn(&SalesRecord) -> GroupKey,
{
    // A measure listed twice must still be summed once.
    let measures: BTreeSet<Measure> = measures.iter().copied().collect();
    let mut groups: BTreeMap<GroupKey, AggregateRow> = BTreeMap::new();

    for record in records {
        let key = key_fn(record);
        let row = groups
            .entry(key.clone())
            .or_insert_with(|| AggregateRow::new(key, &measures));
        row.record_count += 1;

        for measure in &measures {
            let total = row.sums.entry(*measure).or_insert(Decimal::ZERO);
            *total = total.checked_add(measure.value(record)).ok_or_else(|| {
                AnalyticsError::Overflow(format!("{} total for '{}'", measure.label(), row.key))
            })?;
        }
    }

    tracing::debug!(groups = groups.len(), "Aggregated records.");
    Ok(groups.into_values().collect())
}

/// Sums `measures` per category, alphabetically ordered.
pub fn aggregate_by_category<'a, I>(
    records: I,
    measures: &[Measure],
) -> Result<Vec<AggregateRow>, AnalyticsError>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    aggregate(records, |r| GroupKey::Category(r.category.clone()), measures)
}

/// Sums `measures` per calendar month, chronologically ordered.
///
/// Months without records are not synthesized.
pub fn aggregate_by_month<'a, I>(
    records: I,
    measures: &[Measure],
) -> Result<Vec<AggregateRow>, AnalyticsError>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    aggregate(records, |r| GroupKey::Month(r.order_month()), measures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn record(date: (i32, u32, u32), cat: &str, sub: &str, sales: Decimal, profit: Decimal) -> SalesRecord {
        let (y, m, d) = date;
        SalesRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), cat, sub, sales, profit)
    }

    fn sample() -> Vec<SalesRecord> {
        vec![
            record((2024, 3, 14), "Technology", "Phones", dec!(500.00), dec!(80.00)),
            record((2024, 1, 2), "Furniture", "Chairs", dec!(100.00), dec!(10.00)),
            record((2024, 1, 28), "Furniture", "Tables", dec!(200.00), dec!(-20.00)),
            record((2023, 12, 31), "Office Supplies", "Paper", dec!(12.34), dec!(5.10)),
            record((2024, 3, 1), "Furniture", "Chairs", dec!(40.00), dec!(4.00)),
        ]
    }

    #[test]
    fn category_totals_preserve_overall_sales() {
        let records = sample();
        let rows = aggregate_by_category(&records, &[Measure::Sales, Measure::Profit]).unwrap();

        let grouped: Decimal = rows.iter().map(|r| r.sum(Measure::Sales)).sum();
        let raw: Decimal = records.iter().map(|r| r.sales).sum();
        assert_eq!(grouped, raw);

        let keys: Vec<String> = rows.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, vec!["Furniture", "Office Supplies", "Technology"]);

        let furniture = &rows[0];
        assert_eq!(furniture.record_count, 3);
        assert_eq!(furniture.sum(Measure::Sales), dec!(340.00));
        assert_eq!(furniture.sum(Measure::Profit), dec!(-6.00));
    }

    #[test]
    fn monthly_rows_are_unique_and_chronological() {
        let rows = aggregate_by_month(&sample(), &[Measure::Sales]).unwrap();

        let months: Vec<String> = rows.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-03"]);
        assert_eq!(rows[1].sum(Measure::Sales), dec!(300.00));
        assert_eq!(rows[2].sum(Measure::Sales), dec!(540.00));
        // February has no records and must not appear.
        assert!(rows.windows(2).all(|w| w[0].key < w[1].key));
    }

    #[test]
    fn only_requested_measures_are_summed() {
        let rows = aggregate_by_month(&sample(), &[Measure::Sales, Measure::Sales]).unwrap();
        assert!(rows.iter().all(|r| r.sums.len() == 1));
        assert_eq!(rows[0].sum(Measure::Profit), Decimal::ZERO);
    }

    #[test]
    fn empty_input_produces_empty_result() {
        let records: Vec<SalesRecord> = Vec::new();
        assert!(aggregate_by_category(&records, &[Measure::Sales]).unwrap().is_empty());
        assert!(aggregate_by_month(&records, &[Measure::Sales]).unwrap().is_empty());
    }

    #[test]
    fn overflow_is_reported_instead_of_panicking() {
        let records = vec![
            record((2024, 1, 1), "Furniture", "Chairs", Decimal::MAX, Decimal::ZERO),
            record((2024, 1, 2), "Furniture", "Chairs", Decimal::MAX, Decimal::ZERO),
        ];
        let err = aggregate_by_category(&records, &[Measure::Sales]).unwrap_err();
        assert!(matches!(err, AnalyticsError::Overflow(_)));
    }
}
