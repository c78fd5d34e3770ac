//! # Salesboard Dataset Crate
//!
//! This crate is the system's only source of sales data. It reads the CSV
//! export once per session and hands out an immutable, ordered `RecordStore`.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All file and CSV specifics stay here. Higher layers only see
//!   `SalesRecord`s.
//! - **Fail Fast:** A malformed row (bad date, bad amount, missing column) aborts
//!   the load with the offending line number. There is no partial dataset.
//!
//! ## Public API
//!
//! - `load_csv`: opens and parses the file configured in `DatasetSettings`.
//! - `read_records`: parses any `std::io::Read` source.
//! - `RecordStore`: the loaded records plus category lookups.
//! - `DatasetError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod loader;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use error::DatasetError;
pub use loader::{load_csv, read_records};
pub use store::RecordStore;
