/// A user input that changes the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new category was picked. Sub-categories outside it are dropped.
    CategoryChanged(String),
    /// The sub-category selection was replaced wholesale.
    SubCategoriesChanged(Vec<String>),
    /// One sub-category was added or removed.
    SubCategoryToggled(String),
    SelectionCleared,
}
