//! # Salesboard Analytics
//!
//! This crate holds the pure computation behind every report: grouping and
//! summing records, selecting records by category/sub-category, and deriving
//! sales, profit and margin metrics.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   terminals or user input. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every function is a deterministic function of its
//!   arguments; nothing is retained between calls.
//!
//! ## Public API
//!
//! - `aggregate`, `aggregate_by_category`, `aggregate_by_month`: the aggregator.
//! - `filter_records`, `filter_by_category`, `FilterOutcome`: the record filter.
//! - `MetricsEngine`, `MetricsReport`, `profit_margin`: the metrics calculator.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod aggregator;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use aggregator::{AggregateRow, aggregate, aggregate_by_category, aggregate_by_month};
pub use error::AnalyticsError;
pub use filter::{
    FilterOutcome, distinct_categories, distinct_sub_categories, filter_by_category,
    filter_records,
};
pub use metrics::{MetricsEngine, SalesTotals, profit_margin};
pub use report::MetricsReport;
