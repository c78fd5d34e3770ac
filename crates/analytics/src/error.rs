use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Decimal overflow while computing {0}")]
    Overflow(String),
}
