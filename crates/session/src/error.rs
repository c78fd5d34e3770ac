use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Sub-category '{sub_category}' does not occur in category '{category}'")]
    UnknownSubCategory {
        category: String,
        sub_category: String,
    },

    #[error("Select a category before choosing sub-categories")]
    NoCategorySelected,

    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
}
