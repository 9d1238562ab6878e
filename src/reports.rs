use crate::aggregate::{count_by, distinct_count, mode_of, percentages_of, top_n, Ranking};
use crate::config::ReportConfig;
use crate::crosstab::{build_matrix, CrossTabMatrix};
use crate::dataset::CanonicalDataset;
use crate::error::Result;
use crate::loader::LoadReport;
use crate::query::ShiftQuery;
use crate::types::{
    Field, GuardRankingRow, GuardSummaryRow, HourShareRow, HourSlot, OverviewStats,
    PositionShareRow, RecentShiftRow, ShiftRecord, SummaryStats,
};
use crate::util::{format_percent, format_shift_date};
use std::cmp::Ordering;

const NOT_AVAILABLE: &str = "n/a";

pub fn overview(data: &CanonicalDataset) -> OverviewStats {
    OverviewStats {
        total_guards: distinct_count(data, Field::GuardName),
        total_shifts: data.len(),
        unique_positions: distinct_count(data, Field::Position),
        unique_hours: distinct_count(data, Field::Hour),
    }
}

pub fn guard_counts<'a, I>(records: I) -> Ranking<String>
where
    I: IntoIterator<Item = &'a ShiftRecord>,
{
    count_by(records, |r| r.guard_name.clone())
}

pub fn ranking_rows(ranking: &Ranking<String>) -> Vec<GuardRankingRow> {
    ranking
        .entries()
        .iter()
        .enumerate()
        .map(|(idx, (guard_name, shifts))| GuardRankingRow {
            rank: idx + 1,
            guard_name: guard_name.clone(),
            shifts: *shifts,
        })
        .collect()
}

/// Full ranking of guards by total shifts.
pub fn guard_ranking(data: &CanonicalDataset) -> Vec<GuardRankingRow> {
    ranking_rows(&guard_counts(data))
}

/// The `matrix_top_guards` most active guards, most active first.
pub fn top_guards(data: &CanonicalDataset, cfg: &ReportConfig) -> Vec<String> {
    top_n(&guard_counts(data), cfg.matrix_top_guards)
        .into_entries()
        .into_iter()
        .map(|(g, _)| g)
        .collect()
}

/// Leaderboard of guards working the selected hour slot.
pub fn hour_leaders(query: &ShiftQuery, hour: &str, cfg: &ReportConfig) -> Vec<GuardRankingRow> {
    let ranking = guard_counts(query.by_hour(hour));
    ranking_rows(&top_n(&ranking, cfg.top_n))
}

/// Leaderboard of guards working the selected post.
pub fn position_leaders(query: &ShiftQuery, position: &str, cfg: &ReportConfig) -> Vec<GuardRankingRow> {
    let ranking = guard_counts(query.by_position(position));
    ranking_rows(&top_n(&ranking, cfg.top_n))
}

pub fn guard_hour_matrix(data: &CanonicalDataset, cfg: &ReportConfig) -> CrossTabMatrix<String, HourSlot> {
    build_matrix(data, |r| r.guard_name.clone(), |r| r.hour.clone())
        .restrict_to_top_rows(&top_guards(data, cfg))
}

pub fn guard_position_matrix(data: &CanonicalDataset, cfg: &ReportConfig) -> CrossTabMatrix<String, String> {
    build_matrix(data, |r| r.guard_name.clone(), |r| r.position.clone())
        .restrict_to_top_rows(&top_guards(data, cfg))
}

/// Everything shown for a single guard.
#[derive(Debug, Clone)]
pub struct GuardProfile {
    pub guard_name: String,
    pub total_shifts: usize,
    /// Most worked post first.
    pub positions: Vec<PositionShareRow>,
    /// Earliest hour first.
    pub hours: Vec<HourShareRow>,
    /// Positions as rows, hours as columns.
    pub position_by_hour: CrossTabMatrix<String, HourSlot>,
    pub recent: Vec<RecentShiftRow>,
    pub summary: GuardSummaryRow,
}

impl GuardProfile {
    fn empty(guard_name: &str) -> Self {
        Self {
            guard_name: guard_name.to_string(),
            total_shifts: 0,
            positions: Vec::new(),
            hours: Vec::new(),
            position_by_hour: build_matrix(
                std::iter::empty::<&ShiftRecord>(),
                |r| r.position.clone(),
                |r| r.hour.clone(),
            ),
            recent: Vec::new(),
            summary: GuardSummaryRow {
                unique_positions: 0,
                unique_hours: 0,
                most_common_position: NOT_AVAILABLE.to_string(),
                most_common_hour: NOT_AVAILABLE.to_string(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_shifts == 0
    }
}

/// Breakdown of one guard's shifts. An unknown guard gets an empty profile.
pub fn guard_profile(query: &ShiftQuery, guard_name: &str, cfg: &ReportConfig) -> Result<GuardProfile> {
    let records = query.by_guard(guard_name);
    let total = records.len();
    if total == 0 {
        return Ok(GuardProfile::empty(guard_name));
    }

    let by_position = count_by(records.iter().copied(), |r| r.position.clone());
    let positions = percentages_of(&by_position, total)?
        .into_iter()
        .zip(by_position.entries())
        .map(|((position, pct), (_, shifts))| PositionShareRow {
            position,
            shifts: *shifts,
            percent: format_percent(pct),
        })
        .collect();

    let by_hour = count_by(records.iter().copied(), |r| r.hour.clone());
    let mut hours: Vec<(HourSlot, usize, f64)> = percentages_of(&by_hour, total)?
        .into_iter()
        .zip(by_hour.entries())
        .map(|((hour, pct), (_, shifts))| (hour, *shifts, pct))
        .collect();
    hours.sort_by(|a, b| a.0.cmp(&b.0));
    let hours = hours
        .into_iter()
        .map(|(hour, shifts, pct)| HourShareRow {
            hour: hour.label().to_string(),
            shifts,
            percent: format_percent(pct),
        })
        .collect();

    let position_by_hour = build_matrix(
        records.iter().copied(),
        |r| r.hour.clone(),
        |r| r.position.clone(),
    )
    .transpose();

    let mut recent: Vec<&ShiftRecord> = records.clone();
    recent.sort_by(|a, b| newest_first(a, b));
    let recent = recent
        .into_iter()
        .take(cfg.recent_shifts)
        .map(|r| RecentShiftRow {
            date: format_shift_date(r.date),
            hour: r.hour.label().to_string(),
            position: r.position.clone(),
        })
        .collect();

    let summary = GuardSummaryRow {
        unique_positions: distinct_count(records.iter().copied(), Field::Position),
        unique_hours: distinct_count(records.iter().copied(), Field::Hour),
        most_common_position: mode_of(records.iter().copied(), Field::Position)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        most_common_hour: mode_of(records.iter().copied(), Field::Hour)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    };

    Ok(GuardProfile {
        guard_name: guard_name.to_string(),
        total_shifts: total,
        positions,
        hours,
        position_by_hour,
        recent,
        summary,
    })
}

fn newest_first(a: &ShiftRecord, b: &ShiftRecord) -> Ordering {
    b.date.cmp(&a.date).then_with(|| b.hour.cmp(&a.hour))
}

pub fn generate_summary(
    data: &CanonicalDataset,
    report: &LoadReport,
    fingerprint: &str,
    cfg: &ReportConfig,
) -> SummaryStats {
    SummaryStats {
        fingerprint: fingerprint.to_string(),
        total_rows: report.total_rows,
        duplicates_removed: report.duplicates_removed,
        malformed_rows: report.malformed_rows,
        overview: overview(data),
        top_guards: ranking_rows(&top_n(&guard_counts(data), cfg.top_n)),
    }
}
