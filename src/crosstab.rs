//! Dense two-dimensional count tables.

use crate::types::ShiftRecord;
use std::collections::{BTreeMap, BTreeSet};

/// Counts for every (row, column) pair over the observed keys.
///
/// Keys are kept in ascending order; unobserved combinations hold `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossTabMatrix<R, C> {
    row_keys: Vec<R>,
    col_keys: Vec<C>,
    counts: Vec<Vec<usize>>,
}

pub fn build_matrix<'a, I, R, C, FR, FC>(
    records: I,
    mut row_fn: FR,
    mut col_fn: FC,
) -> CrossTabMatrix<R, C>
where
    I: IntoIterator<Item = &'a ShiftRecord>,
    R: Ord + Clone,
    C: Ord + Clone,
    FR: FnMut(&ShiftRecord) -> R,
    FC: FnMut(&ShiftRecord) -> C,
{
    let pairs: Vec<(R, C)> = records.into_iter().map(|r| (row_fn(r), col_fn(r))).collect();

    let row_keys: Vec<R> = pairs
        .iter()
        .map(|(r, _)| r.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let col_keys: Vec<C> = pairs
        .iter()
        .map(|(_, c)| c.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let row_idx: BTreeMap<&R, usize> = row_keys.iter().enumerate().map(|(i, k)| (k, i)).collect();
    let col_idx: BTreeMap<&C, usize> = col_keys.iter().enumerate().map(|(i, k)| (k, i)).collect();

    let mut counts = vec![vec![0usize; col_keys.len()]; row_keys.len()];
    for (r, c) in &pairs {
        counts[row_idx[r]][col_idx[c]] += 1;
    }

    CrossTabMatrix { row_keys, col_keys, counts }
}

impl<R, C> CrossTabMatrix<R, C> {
    pub fn row_keys(&self) -> &[R] {
        &self.row_keys
    }

    pub fn col_keys(&self) -> &[C] {
        &self.col_keys
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.row_keys.len(), self.col_keys.len())
    }

    pub fn is_empty(&self) -> bool {
        self.row_keys.is_empty() || self.col_keys.is_empty()
    }

    /// Row counts aligned with [`Self::col_keys`].
    pub fn rows(&self) -> impl Iterator<Item = (&R, &[usize])> + '_ {
        self.row_keys.iter().zip(self.counts.iter().map(|r| r.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn get(&self, row: &R, col: &C) -> Option<usize>
    where
        R: PartialEq,
        C: PartialEq,
    {
        let ri = self.row_keys.iter().position(|k| k == row)?;
        let ci = self.col_keys.iter().position(|k| k == col)?;
        Some(self.counts[ri][ci])
    }

    /// Keep only the rows named in `top_keys`, in that order.
    ///
    /// Keys that are not rows of this matrix are skipped. Columns are left
    /// untouched, so a column can end up all zeros.
    pub fn restrict_to_top_rows(&self, top_keys: &[R]) -> CrossTabMatrix<R, C>
    where
        R: PartialEq + Clone,
        C: Clone,
    {
        let mut row_keys = Vec::with_capacity(top_keys.len());
        let mut counts = Vec::with_capacity(top_keys.len());
        for key in top_keys {
            if let Some(i) = self.row_keys.iter().position(|k| k == key) {
                row_keys.push(self.row_keys[i].clone());
                counts.push(self.counts[i].clone());
            }
        }
        CrossTabMatrix {
            row_keys,
            col_keys: self.col_keys.clone(),
            counts,
        }
    }

    pub fn transpose(&self) -> CrossTabMatrix<C, R>
    where
        R: Clone,
        C: Clone,
    {
        let counts = (0..self.col_keys.len())
            .map(|ci| self.counts.iter().map(|row| row[ci]).collect())
            .collect();
        CrossTabMatrix {
            row_keys: self.col_keys.clone(),
            col_keys: self.row_keys.clone(),
            counts,
        }
    }
}
