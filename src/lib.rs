//! Rankings and cross-tabulations over security guard shift logs.
//!
//! Raw CSV rows are normalized into a [`CanonicalDataset`] once per load;
//! every report is then computed from it on demand.

pub mod aggregate;
pub mod cache;
pub mod cli;
pub mod config;
pub mod crosstab;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod output;
pub mod query;
pub mod reports;
pub mod types;
pub mod util;

pub use aggregate::{count_by, mode_of, percentages_of, top_n, Ranking};
pub use config::ReportConfig;
pub use crosstab::{build_matrix, CrossTabMatrix};
pub use dataset::CanonicalDataset;
pub use error::{Result, ShiftError};
pub use loader::{load_and_clean, normalize, LoadReport, ParseMode};
pub use query::ShiftQuery;
pub use types::{Field, HourSlot, RawRow, ShiftRecord};
