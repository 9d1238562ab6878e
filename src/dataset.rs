use crate::types::ShiftRecord;

/// The deduplicated, type-parsed record set every report is computed from.
///
/// Built once per load by [`crate::loader::normalize`] and never mutated
/// afterwards; filters borrow from it instead of copying.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalDataset {
    records: Vec<ShiftRecord>,
}

impl CanonicalDataset {
    pub(crate) fn from_canonical(records: Vec<ShiftRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ShiftRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShiftRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filter_by_guard(&self, guard_name: &str) -> Vec<&ShiftRecord> {
        self.filter(|r| r.guard_name == guard_name)
    }

    /// Match on the hour label exactly as it appears in the source.
    pub fn filter_by_hour(&self, hour: &str) -> Vec<&ShiftRecord> {
        self.filter(|r| r.hour.label() == hour)
    }

    pub fn filter_by_position(&self, position: &str) -> Vec<&ShiftRecord> {
        self.filter(|r| r.position == position)
    }

    fn filter<P>(&self, pred: P) -> Vec<&ShiftRecord>
    where
        P: Fn(&ShiftRecord) -> bool,
    {
        self.records.iter().filter(|r| pred(r)).collect()
    }
}

impl<'a> IntoIterator for &'a CanonicalDataset {
    type Item = &'a ShiftRecord;
    type IntoIter = std::slice::Iter<'a, ShiftRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
