//! Grouping, counting and ranking over shift records.
//!
//! All functions take any iterator of borrowed records, so they work the same
//! on a whole [`crate::dataset::CanonicalDataset`] or on a filtered subset.

use crate::error::{Result, ShiftError};
use crate::types::{Field, ShiftRecord};
use crate::util::round1;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// `(key, count)` pairs ordered by count descending.
///
/// Equal counts keep the order in which their keys were first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking<K> {
    entries: Vec<(K, usize)>,
}

impl<K> Ranking<K> {
    pub fn entries(&self) -> &[(K, usize)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(K, usize)> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn count_of(&self, key: &K) -> Option<usize>
    where
        K: PartialEq,
    {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, c)| *c)
    }
}

pub fn count_by<'a, I, K, F>(records: I, mut key_fn: F) -> Ranking<K>
where
    I: IntoIterator<Item = &'a ShiftRecord>,
    K: Eq + Hash + Clone,
    F: FnMut(&ShiftRecord) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut entries: Vec<(K, usize)> = Vec::new();
    for r in records {
        let key = key_fn(r);
        match index.get(&key) {
            Some(&i) => entries[i].1 += 1,
            None => {
                index.insert(key.clone(), entries.len());
                entries.push((key, 1));
            }
        }
    }
    // `sort_by` is stable, which gives the first-seen tie-break.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    Ranking { entries }
}

/// The first `n` entries, or all of them when fewer exist.
pub fn top_n<K: Clone>(ranking: &Ranking<K>, n: usize) -> Ranking<K> {
    Ranking {
        entries: ranking.entries.iter().take(n).cloned().collect(),
    }
}

/// Share of `total` for each ranked key, in percent rounded to one decimal.
pub fn percentages_of<K: Clone>(ranking: &Ranking<K>, total: usize) -> Result<Vec<(K, f64)>> {
    if total == 0 {
        return Err(ShiftError::DivisionUndefined {
            what: format!("{} group(s) over a total of 0", ranking.len()),
        });
    }
    Ok(ranking
        .entries
        .iter()
        .map(|(k, c)| (k.clone(), round1(*c as f64 / total as f64 * 100.0)))
        .collect())
}

/// Most frequent value of `field`. Ties go to the value seen first.
pub fn mode_of<'a, I>(records: I, field: Field) -> Option<String>
where
    I: IntoIterator<Item = &'a ShiftRecord>,
{
    count_by(records, |r| field.value_of(r))
        .into_entries()
        .into_iter()
        .next()
        .map(|(k, _)| k)
}

pub fn distinct_count<'a, I>(records: I, field: Field) -> usize
where
    I: IntoIterator<Item = &'a ShiftRecord>,
{
    records
        .into_iter()
        .map(|r| field.value_of(r))
        .collect::<HashSet<_>>()
        .len()
}
