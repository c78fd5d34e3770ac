use crate::error::CoreError;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One sales transaction. Records are immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub order_date: NaiveDate,
    pub category: String,
    pub sub_category: String,
    /// Non-negative sales amount.
    pub sales: Decimal,
    /// Profit amount; negative for a loss.
    pub profit: Decimal,
}

impl SalesRecord {
    pub fn new(
        order_date: NaiveDate,
        category: impl Into<String>,
        sub_category: impl Into<String>,
        sales: Decimal,
        profit: Decimal,
    ) -> Self {
        Self {
            order_date,
            category: category.into(),
            sub_category: sub_category.into(),
            sales,
            profit,
        }
    }

    /// Builds a record, rejecting blank labels and negative sales.
    pub fn try_new(
        order_date: NaiveDate,
        category: impl Into<String>,
        sub_category: impl Into<String>,
        sales: Decimal,
        profit: Decimal,
    ) -> Result<Self, CoreError> {
        let record = Self::new(order_date, category, sub_category, sales, profit);
        if record.category.trim().is_empty() {
            return Err(CoreError::InvalidInput("category".to_string(), "must not be blank".to_string()));
        }
        if record.sub_category.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "sub_category".to_string(),
                "must not be blank".to_string(),
            ));
        }
        if record.sales < Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "sales".to_string(),
                format!("must not be negative, got {}", record.sales),
            ));
        }
        Ok(record)
    }

    /// The first day of the month this record's order falls in.
    pub fn order_month(&self) -> NaiveDate {
        month_start(self.order_date)
    }
}

/// Truncates a date to the first day of its month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month, so `with_day(1)` cannot fail.
    date.with_day(1).unwrap_or(date)
}
