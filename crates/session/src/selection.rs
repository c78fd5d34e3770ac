use serde::Serialize;
use std::collections::BTreeSet;

/// Where the selection currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    NoCategory,
    SubCategoriesEmpty,
    SubCategoriesSelected,
}

/// The user's current choices.
///
/// Every selected sub-category occurs within `category`; the session enforces this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub category: Option<String>,
    pub sub_categories: BTreeSet<String>,
}

impl Selection {
    pub fn phase(&self) -> SelectionPhase {
        match (&self.category, self.sub_categories.is_empty()) {
            (None, _) => SelectionPhase::NoCategory,
            (Some(_), true) => SelectionPhase::SubCategoriesEmpty,
            (Some(_), false) => SelectionPhase::SubCategoriesSelected,
        }
    }
}
