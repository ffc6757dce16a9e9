//! Domain state - business/data state separate from UI concerns

use super::profile::FacultyProfile;
use super::record::Record;
use super::schema::Category;
use std::collections::BTreeMap;

/// Domain state containing all business data
#[derive(Default)]
pub struct DomainState {
    /// Records per category, in insertion order
    pub records: BTreeMap<Category, Vec<Record>>,

    /// Faculty profile from the wizard, once completed
    pub profile: Option<FacultyProfile>,
}

impl DomainState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records_for(&self, category: Category) -> &[Record] {
        self.records.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn record(&self, category: Category, id: u64) -> Option<&Record> {
        self.records_for(category).iter().find(|r| r.id == id)
    }

    pub fn total_records(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap as Fields;

    #[test]
    fn test_records_for_missing_category_is_empty() {
        let domain = DomainState::new();
        assert!(domain.records_for(Category::Awards).is_empty());
        assert_eq!(domain.total_records(), 0);
    }

    #[test]
    fn test_record_lookup_by_id() {
        let mut domain = DomainState::new();
        domain
            .records
            .entry(Category::Books)
            .or_default()
            .push(Record::new(3, Fields::new()));
        assert!(domain.record(Category::Books, 3).is_some());
        assert!(domain.record(Category::Books, 4).is_none());
        assert!(domain.record(Category::Awards, 3).is_none());
    }
}
