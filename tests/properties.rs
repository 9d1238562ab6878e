// Invariants of the normalizer, ranking and cross-tab engine over generated logs.

use proptest::prelude::*;
use shift_report::crosstab::build_matrix;
use shift_report::{count_by, normalize, percentages_of, top_n, ParseMode, RawRow};
use std::collections::HashSet;

fn raw_row() -> impl Strategy<Value = RawRow> {
    (
        prop::sample::select(vec!["Avi", "Ben", "Dor", "Eden", "Gal"]),
        1u32..=28,
        1u32..=12,
        prop::sample::select(vec!["00:00", "08:00", "16:00", "23:30"]),
        prop::sample::select(vec!["Gate1", "Gate2", "Lobby"]),
    )
        .prop_map(|(guard, day, month, hour, position)| RawRow {
            guard_name: guard.to_string(),
            date: format!("{:02}/{:02}/2024", day, month),
            hour: hour.to_string(),
            position: position.to_string(),
        })
}

fn raw_rows() -> impl Strategy<Value = Vec<RawRow>> {
    // Few distinct values so duplicates are common.
    prop::collection::vec(raw_row(), 0..60).prop_flat_map(|rows| {
        let n = rows.len();
        (Just(rows), prop::collection::vec(0..n.max(1), 0..20))
    })
    .prop_map(|(mut rows, repeats)| {
        if !rows.is_empty() {
            for i in repeats {
                let dup = rows[i % rows.len()].clone();
                rows.push(dup);
            }
        }
        rows
    })
}

proptest! {
    #[test]
    fn normalize_is_idempotent(rows in raw_rows()) {
        let (once, _) = normalize(rows, ParseMode::Strict).unwrap();
        let again: Vec<RawRow> = once.iter().map(|r| r.to_raw()).collect();
        let (twice, report) = normalize(again, ParseMode::Strict).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(report.duplicates_removed, 0);
    }

    #[test]
    fn canonical_records_are_pairwise_distinct(rows in raw_rows()) {
        let total = rows.len();
        let (ds, report) = normalize(rows, ParseMode::Strict).unwrap();
        let unique: HashSet<_> = ds.iter().collect();
        prop_assert_eq!(unique.len(), ds.len());
        prop_assert_eq!(report.duplicates_removed, total - ds.len());
    }

    #[test]
    fn ranking_counts_sum_to_subset_size(rows in raw_rows()) {
        let (ds, _) = normalize(rows, ParseMode::Strict).unwrap();
        prop_assert_eq!(count_by(&ds, |r| r.guard_name.clone()).total(), ds.len());
        let subset = ds.filter_by_position("Gate1");
        prop_assert_eq!(count_by(subset.iter().copied(), |r| r.hour.clone()).total(), subset.len());
    }

    #[test]
    fn ranking_is_sorted_descending(rows in raw_rows()) {
        let (ds, _) = normalize(rows, ParseMode::Strict).unwrap();
        let ranking = count_by(&ds, |r| r.position.clone());
        for w in ranking.entries().windows(2) {
            prop_assert!(w[0].1 >= w[1].1);
        }
    }

    #[test]
    fn percentages_sum_to_hundred(rows in raw_rows()) {
        let (ds, _) = normalize(rows, ParseMode::Strict).unwrap();
        prop_assume!(!ds.is_empty());
        let ranking = count_by(&ds, |r| r.guard_name.clone());
        let pct = percentages_of(&ranking, ds.len()).unwrap();
        let sum: f64 = pct.iter().map(|(_, p)| p).sum();
        let tolerance = 0.1 * pct.len() as f64 + 1e-9;
        prop_assert!((sum - 100.0).abs() <= tolerance, "sum = {}", sum);
    }

    #[test]
    fn matrix_covers_full_key_product(rows in raw_rows()) {
        let (ds, _) = normalize(rows, ParseMode::Strict).unwrap();
        let m = build_matrix(&ds, |r| r.guard_name.clone(), |r| r.hour.clone());
        let guards: HashSet<_> = ds.iter().map(|r| r.guard_name.clone()).collect();
        let hours: HashSet<_> = ds.iter().map(|r| r.hour.clone()).collect();
        prop_assert_eq!(m.shape(), (guards.len(), hours.len()));
        for g in m.row_keys() {
            for h in m.col_keys() {
                prop_assert!(m.get(g, h).is_some());
            }
        }
        prop_assert_eq!(m.total(), ds.len());
    }

    #[test]
    fn top_n_length_is_bounded(rows in raw_rows(), n in 0usize..10) {
        let (ds, _) = normalize(rows, ParseMode::Strict).unwrap();
        let ranking = count_by(&ds, |r| r.guard_name.clone());
        let top = top_n(&ranking, n);
        prop_assert_eq!(top.len(), n.min(ranking.len()));
        prop_assert_eq!(top.entries(), &ranking.entries()[..top.len()]);
    }
}
