use crate::loader::ParseMode;

/// Default location of the shift log, relative to the working directory.
pub const DEFAULT_SOURCE: &str = "shifts_structured_long.csv";

/// Tunables for report size and load behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    /// Rows in each "most active" leaderboard.
    pub top_n: usize,
    /// Rows in the short leader list shown next to a leaderboard.
    pub preview_n: usize,
    /// Guards kept in the guard × hour and guard × position matrices.
    pub matrix_top_guards: usize,
    /// Most recent shifts listed on a guard profile.
    pub recent_shifts: usize,
    pub parse_mode: ParseMode,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            preview_n: 5,
            matrix_top_guards: 15,
            recent_shifts: 10,
            parse_mode: ParseMode::Strict,
        }
    }
}
