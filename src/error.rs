use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, normalizing or aggregating shift records.
///
/// Selecting a guard, hour or position with no matching records is not an
/// error: those queries return empty results.
#[derive(Debug, Error)]
pub enum ShiftError {
    #[error("shift record source '{}' not found", path.display())]
    SourceNotFound { path: PathBuf },
    #[error("row {row}: malformed date '{value}' (expected DD/MM/YYYY)")]
    MalformedDate { row: usize, value: String },
    #[error("row {row}: malformed hour '{value}' (expected HH:MM)")]
    MalformedTime { row: usize, value: String },
    #[error("percentage undefined for empty group: {what}")]
    DivisionUndefined { what: String },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ShiftError {
    /// Row-level parse failures; lenient loads skip these instead of aborting.
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            ShiftError::MalformedDate { .. } | ShiftError::MalformedTime { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ShiftError>;
