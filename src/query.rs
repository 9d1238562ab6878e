//! Read-only views the front end asks for with the user's current selection.

use crate::dataset::CanonicalDataset;
use crate::types::{HourSlot, ShiftRecord};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Selection-driven queries over one loaded dataset.
///
/// Holds its own `Arc`, so a reload elsewhere never changes what an
/// existing query sees.
#[derive(Debug, Clone)]
pub struct ShiftQuery {
    dataset: Arc<CanonicalDataset>,
}

impl ShiftQuery {
    pub fn new(dataset: Arc<CanonicalDataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &CanonicalDataset {
        &self.dataset
    }

    /// Distinct hour labels, earliest time of day first.
    pub fn available_hours(&self) -> Vec<String> {
        self.dataset
            .iter()
            .map(|r| r.hour.clone())
            .collect::<BTreeSet<HourSlot>>()
            .into_iter()
            .map(|h| h.label().to_string())
            .collect()
    }

    pub fn available_positions(&self) -> Vec<String> {
        self.sorted_distinct(|r| &r.position)
    }

    pub fn available_guards(&self) -> Vec<String> {
        self.sorted_distinct(|r| &r.guard_name)
    }

    pub fn by_hour(&self, hour: &str) -> Vec<&ShiftRecord> {
        self.dataset.filter_by_hour(hour)
    }

    pub fn by_position(&self, position: &str) -> Vec<&ShiftRecord> {
        self.dataset.filter_by_position(position)
    }

    pub fn by_guard(&self, guard_name: &str) -> Vec<&ShiftRecord> {
        self.dataset.filter_by_guard(guard_name)
    }

    fn sorted_distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&ShiftRecord) -> &String,
    {
        self.dataset
            .iter()
            .map(|r| field(r).as_str())
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{normalize, ParseMode};
    use crate::types::RawRow;

    fn query(rows: &[(&str, &str, &str, &str)]) -> ShiftQuery {
        let raw = rows
            .iter()
            .map(|(g, d, h, p)| RawRow {
                guard_name: g.to_string(),
                date: d.to_string(),
                hour: h.to_string(),
                position: p.to_string(),
            })
            .collect();
        let (ds, _) = normalize(raw, ParseMode::Strict).unwrap();
        ShiftQuery::new(Arc::new(ds))
    }

    fn scenario() -> ShiftQuery {
        query(&[
            ("Guard A", "01/01/2024", "08:00", "Gate1"),
            ("Guard A", "01/01/2024", "08:00", "Gate1"),
            ("Guard B", "01/01/2024", "09:00", "Gate2"),
        ])
    }

    #[test]
    fn filter_by_hour_matches_exactly() {
        let q = scenario();
        let hits = q.by_hour("08:00");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].guard_name, "Guard A");
    }

    #[test]
    fn unknown_selection_is_empty_not_error() {
        let q = scenario();
        assert!(q.by_hour("23:59").is_empty());
        assert!(q.by_position("Roof").is_empty());
        assert!(q.by_guard("Nobody").is_empty());
    }

    #[test]
    fn selectable_values_are_sorted_and_distinct() {
        let q = query(&[
            ("Zoe", "01/01/2024", "20:00", "Lobby"),
            ("Adam", "01/01/2024", "06:30", "Gate2"),
            ("Zoe", "02/01/2024", "06:30", "Gate1"),
            ("Mia", "03/01/2024", "13:00", "Gate1"),
        ]);
        assert_eq!(q.available_guards(), ["Adam", "Mia", "Zoe"]);
        assert_eq!(q.available_positions(), ["Gate1", "Gate2", "Lobby"]);
        assert_eq!(q.available_hours(), ["06:30", "13:00", "20:00"]);
    }

    #[test]
    fn empty_dataset_offers_nothing() {
        let q = ShiftQuery::new(Arc::new(CanonicalDataset::default()));
        assert!(q.available_hours().is_empty());
        assert!(q.available_guards().is_empty());
    }
}
