use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use tabled::Tabled;

use crate::util::{format_shift_date, parse_hour};

/// One CSV row as read from disk, before any parsing.
///
/// Headers are trimmed by the reader, so `" guard_name "` maps here too.
/// Columns other than these four are ignored.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RawRow {
    pub guard_name: String,
    pub date: String,
    pub hour: String,
    pub position: String,
}

/// A time-of-day slot label such as `"08:00"`.
///
/// Keeps the original label for display and equality filtering, and the
/// parsed time for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HourSlot {
    label: String,
    time: NaiveTime,
}

impl HourSlot {
    pub fn parse(label: &str) -> Option<HourSlot> {
        let time = parse_hour(label)?;
        Some(HourSlot { label: label.to_string(), time })
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Ord for HourSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl PartialOrd for HourSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HourSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl Serialize for HourSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}

/// One observed guard assignment after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ShiftRecord {
    pub guard_name: String,
    pub date: NaiveDate,
    pub hour: HourSlot,
    pub position: String,
}

impl ShiftRecord {
    /// Render back into the on-disk representation.
    pub fn to_raw(&self) -> RawRow {
        RawRow {
            guard_name: self.guard_name.clone(),
            date: format_shift_date(self.date),
            hour: self.hour.label().to_string(),
            position: self.position.clone(),
        }
    }
}

/// Record fields usable as grouping keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    GuardName,
    Date,
    Hour,
    Position,
}

impl Field {
    pub fn value_of(self, record: &ShiftRecord) -> String {
        match self {
            Field::GuardName => record.guard_name.clone(),
            Field::Date => format_shift_date(record.date),
            Field::Hour => record.hour.label().to_string(),
            Field::Position => record.position.clone(),
        }
    }
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq, Eq)]
pub struct OverviewStats {
    #[serde(rename = "TotalGuards")]
    #[tabled(rename = "TotalGuards")]
    pub total_guards: usize,
    #[serde(rename = "TotalShifts")]
    #[tabled(rename = "TotalShifts")]
    pub total_shifts: usize,
    #[serde(rename = "UniquePositions")]
    #[tabled(rename = "UniquePositions")]
    pub unique_positions: usize,
    #[serde(rename = "UniqueHours")]
    #[tabled(rename = "UniqueHours")]
    pub unique_hours: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq, Eq)]
pub struct GuardRankingRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Guard")]
    #[tabled(rename = "Guard")]
    pub guard_name: String,
    #[serde(rename = "Shifts")]
    #[tabled(rename = "Shifts")]
    pub shifts: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct PositionShareRow {
    #[serde(rename = "Position")]
    #[tabled(rename = "Position")]
    pub position: String,
    #[serde(rename = "Shifts")]
    #[tabled(rename = "Shifts")]
    pub shifts: usize,
    #[serde(rename = "Percent")]
    #[tabled(rename = "Percent")]
    pub percent: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct HourShareRow {
    #[serde(rename = "Hour")]
    #[tabled(rename = "Hour")]
    pub hour: String,
    #[serde(rename = "Shifts")]
    #[tabled(rename = "Shifts")]
    pub shifts: usize,
    #[serde(rename = "Percent")]
    #[tabled(rename = "Percent")]
    pub percent: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq, Eq)]
pub struct RecentShiftRow {
    #[serde(rename = "Date")]
    #[tabled(rename = "Date")]
    pub date: String,
    #[serde(rename = "Hour")]
    #[tabled(rename = "Hour")]
    pub hour: String,
    #[serde(rename = "Position")]
    #[tabled(rename = "Position")]
    pub position: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq, Eq)]
pub struct GuardSummaryRow {
    #[serde(rename = "UniquePositions")]
    #[tabled(rename = "UniquePositions")]
    pub unique_positions: usize,
    #[serde(rename = "UniqueHours")]
    #[tabled(rename = "UniqueHours")]
    pub unique_hours: usize,
    #[serde(rename = "MostCommonPosition")]
    #[tabled(rename = "MostCommonPosition")]
    pub most_common_position: String,
    #[serde(rename = "MostCommonHour")]
    #[tabled(rename = "MostCommonHour")]
    pub most_common_hour: String,
}

/// Load diagnostics for `summary.json`.
#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub fingerprint: String,
    pub total_rows: usize,
    pub duplicates_removed: usize,
    pub malformed_rows: usize,
    pub overview: OverviewStats,
    pub top_guards: Vec<GuardRankingRow>,
}
