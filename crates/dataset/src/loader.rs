use crate::error::DatasetError;
use crate::store::RecordStore;
use chrono::NaiveDate;
use configuration::DatasetSettings;
use core_types::SalesRecord;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::str::FromStr;

/// The columns read from a sales export row. Any other column is ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Order_Date", alias = "Order Date")]
    order_date: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Sub_Category", alias = "Sub-Category", alias = "Sub Category")]
    sub_category: String,
    #[serde(rename = "Sales")]
    sales: String,
    #[serde(rename = "Profit")]
    profit: String,
}

/// Opens the CSV file at `settings.path` and loads every row into a `RecordStore`.
pub fn load_csv(settings: &DatasetSettings) -> Result<RecordStore, DatasetError> {
    let file = File::open(&settings.path).map_err(|source| DatasetError::Open {
        path: settings.path.clone(),
        source,
    })?;
    let records = read_records(file, &settings.date_formats)?;

    tracing::info!(
        path = %settings.path.display(),
        records = records.len(),
        "Loaded sales dataset."
    );
    Ok(RecordStore::new(records))
}

/// Parses sales records from CSV with a header row.
///
/// `date_formats` are tried in order for every order date.
pub fn read_records<R: Read>(
    reader: R,
    date_formats: &[String],
) -> Result<Vec<SalesRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result?;
        let line = row.position().map_or(0, |p| p.line());
        let raw: RawRecord = row.deserialize(Some(&headers))?;

        let order_date = parse_date(&raw.order_date, date_formats)
            .ok_or_else(|| DatasetError::InvalidDate { line, value: raw.order_date.clone() })?;
        let sales = parse_amount(&raw.sales, "Sales", line)?;
        let profit = parse_amount(&raw.profit, "Profit", line)?;

        let record = SalesRecord::try_new(order_date, raw.category, raw.sub_category, sales, profit)
            .map_err(|source| DatasetError::InvalidRecord { line, source })?;
        records.push(record);
    }

    tracing::debug!(records = records.len(), "Parsed CSV rows.");
    Ok(records)
}

fn parse_date(value: &str, formats: &[String]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn parse_amount(value: &str, column: &'static str, line: u64) -> Result<Decimal, DatasetError> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| DatasetError::InvalidAmount {
            line,
            column,
            value: value.to_string(),
        })
}
