use core_types::SalesRecord;

/// The loaded sales records, in source order.
///
/// The store never changes after it is built. Each session owns its own copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<SalesRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct categories, first-seen order.
    pub fn categories(&self) -> Vec<String> {
        analytics::distinct_categories(&self.records)
    }

    /// Distinct sub-categories within `category`, first-seen order.
    pub fn sub_categories(&self, category: &str) -> Vec<String> {
        analytics::distinct_sub_categories(&self.records, category)
    }
}
