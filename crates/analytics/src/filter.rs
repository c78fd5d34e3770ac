use core_types::SalesRecord;
use std::collections::{BTreeSet, HashSet};

/// The result of filtering records by a category and a set of sub-categories.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome<'a> {
    /// No sub-category was selected. Callers must not compute metrics or charts.
    NoSelection,
    /// Records matching the selection, in source order. May be empty.
    Matched(Vec<&'a SalesRecord>),
}

/// Selects the records in `category` whose sub-category is one of `sub_categories`.
///
/// An empty `sub_categories` set yields `FilterOutcome::NoSelection` rather than
/// all or none of the records.
pub fn filter_records<'a>(
    records: &'a [SalesRecord],
    category: &str,
    sub_categories: &BTreeSet<String>,
) -> FilterOutcome<'a> {
    if sub_categories.is_empty() {
        return FilterOutcome::NoSelection;
    }

    let matched: Vec<&SalesRecord> = records
        .iter()
        .filter(|r| r.category == category && sub_categories.contains(&r.sub_category))
        .collect();

    tracing::debug!(
        category,
        sub_categories = sub_categories.len(),
        matched = matched.len(),
        "Filtered records."
    );
    FilterOutcome::Matched(matched)
}

/// Selects every record in `category`.
pub fn filter_by_category<'a>(records: &'a [SalesRecord], category: &str) -> Vec<&'a SalesRecord> {
    records.iter().filter(|r| r.category == category).collect()
}

/// Distinct categories in the order they first appear.
pub fn distinct_categories(records: &[SalesRecord]) -> Vec<String> {
    first_seen(records.iter().map(|r| r.category.as_str()))
}

/// Distinct sub-categories occurring within `category`, in the order they first appear.
pub fn distinct_sub_categories(records: &[SalesRecord], category: &str) -> Vec<String> {
    first_seen(
        records
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.sub_category.as_str()),
    )
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample() -> Vec<SalesRecord> {
        let date = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        vec![
            SalesRecord::new(date, "Furniture", "Chairs", dec!(100), dec!(10)),
            SalesRecord::new(date, "Technology", "Phones", dec!(300), dec!(45)),
            SalesRecord::new(date, "Furniture", "Tables", dec!(200), dec!(-20)),
            SalesRecord::new(date, "Furniture", "Chairs", dec!(50), dec!(5)),
            SalesRecord::new(date, "Technology", "Machines", dec!(900), dec!(-60)),
        ]
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn matches_category_and_sub_categories() {
        let records = sample();
        let outcome = filter_records(&records, "Furniture", &set(&["Chairs"]));

        let FilterOutcome::Matched(matched) = outcome else {
            panic!("expected matched records, got {outcome:?}");
        };
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|r| r.sub_category == "Chairs"));
        assert_eq!(matched[0].sales, dec!(100));
        assert_eq!(matched[1].sales, dec!(50));
    }

    #[test]
    fn empty_sub_category_set_signals_no_selection() {
        let records = sample();
        let outcome = filter_records(&records, "Furniture", &BTreeSet::new());
        assert_eq!(outcome, FilterOutcome::NoSelection);
    }

    #[test]
    fn sub_category_from_another_category_matches_nothing() {
        let records = sample();
        let outcome = filter_records(&records, "Furniture", &set(&["Phones"]));
        assert_eq!(outcome, FilterOutcome::Matched(Vec::new()));
    }

    #[test]
    fn full_sub_category_set_equals_category_filter() {
        let records = sample();
        let all_subs: BTreeSet<String> =
            distinct_sub_categories(&records, "Technology").into_iter().collect();

        let by_subs = filter_records(&records, "Technology", &all_subs);
        let by_category = filter_by_category(&records, "Technology");
        assert_eq!(by_subs, FilterOutcome::Matched(by_category));
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let records = sample();
        assert_eq!(distinct_categories(&records), vec!["Furniture", "Technology"]);
        assert_eq!(
            distinct_sub_categories(&records, "Furniture"),
            vec!["Chairs", "Tables"]
        );
        assert!(distinct_sub_categories(&records, "Office Supplies").is_empty());
    }
}
