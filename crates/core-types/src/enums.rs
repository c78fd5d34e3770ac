use crate::structs::SalesRecord;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric field of a `SalesRecord` that can be summed by an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Measure {
    Sales,
    Profit,
}

impl Measure {
    /// Reads this measure's value from a record.
    pub fn value(&self, record: &SalesRecord) -> Decimal {
        match self {
            Measure::Sales => record.sales,
            Measure::Profit => record.profit,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Measure::Sales => "Sales",
            Measure::Profit => "Profit",
        }
    }
}

/// The key an aggregate row is grouped under.
///
/// Keys are totally ordered, so month keys sort chronologically and category
/// keys alphabetically. A `Month` key always holds the first day of its month.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum GroupKey {
    Category(String),
    Month(NaiveDate),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Category(name) => write!(f, "{name}"),
            GroupKey::Month(month) => write!(f, "{}", month.format("%Y-%m")),
        }
    }
}
