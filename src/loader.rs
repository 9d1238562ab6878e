use crate::dataset::CanonicalDataset;
use crate::error::{Result, ShiftError};
use crate::types::{HourSlot, RawRow, ShiftRecord};
use crate::util::parse_shift_date;
use csv::{ReaderBuilder, Trim};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{info, warn};

/// How row-level parse failures are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// The first malformed date or hour aborts the whole load.
    #[default]
    Strict,
    /// Malformed rows are skipped and counted in [`LoadReport::malformed_rows`].
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub duplicates_removed: usize,
    pub malformed_rows: usize,
    pub canonical_rows: usize,
}

/// A dataset loaded from disk together with its diagnostics.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub dataset: CanonicalDataset,
    pub report: LoadReport,
    /// Hex SHA-256 of the raw source bytes.
    pub fingerprint: String,
}

/// Read raw rows from any CSV reader. Header whitespace is insignificant.
pub fn read_raw<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);
    let mut rows = Vec::new();
    for result in rdr.deserialize::<RawRow>() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Parse and deduplicate raw rows into a [`CanonicalDataset`].
///
/// Rows are numbered from 1 in error messages. Survivors keep their input
/// order; the first of a set of identical records is the one kept.
pub fn normalize(raw: Vec<RawRow>, mode: ParseMode) -> Result<(CanonicalDataset, LoadReport)> {
    let total_rows = raw.len();
    let mut malformed_rows = 0usize;
    let mut parsed: Vec<ShiftRecord> = Vec::with_capacity(raw.len());

    for (idx, row) in raw.into_iter().enumerate() {
        match parse_row(idx + 1, row) {
            Ok(rec) => parsed.push(rec),
            Err(e) if mode == ParseMode::Lenient && e.is_row_level() => {
                warn!(error = %e, "skipping malformed shift row");
                malformed_rows += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let parsed_rows = parsed.len();
    let mut seen: HashSet<ShiftRecord> = HashSet::with_capacity(parsed_rows);
    let records: Vec<ShiftRecord> = parsed
        .into_iter()
        .filter(|r| seen.insert(r.clone()))
        .collect();

    let report = LoadReport {
        total_rows,
        duplicates_removed: parsed_rows - records.len(),
        malformed_rows,
        canonical_rows: records.len(),
    };
    if report.duplicates_removed > 0 {
        info!(removed = report.duplicates_removed, "removed duplicate shift records");
    }
    if report.malformed_rows > 0 {
        warn!(skipped = report.malformed_rows, "malformed rows skipped during load");
    }
    Ok((CanonicalDataset::from_canonical(records), report))
}

fn parse_row(row: usize, raw: RawRow) -> Result<ShiftRecord> {
    let date = parse_shift_date(&raw.date).ok_or_else(|| ShiftError::MalformedDate {
        row,
        value: raw.date.clone(),
    })?;
    let hour = HourSlot::parse(&raw.hour).ok_or_else(|| ShiftError::MalformedTime {
        row,
        value: raw.hour.clone(),
    })?;
    Ok(ShiftRecord {
        guard_name: raw.guard_name,
        date,
        hour,
        position: raw.position,
    })
}

pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Read the CSV at `path`, fingerprint it and normalize its rows.
pub fn load_and_clean(path: impl AsRef<Path>, mode: ParseMode) -> Result<LoadedSource> {
    let path = path.as_ref();
    let bytes = read_source(path)?;
    let fingerprint = fingerprint(&bytes);
    let raw = read_raw(bytes.as_slice())?;
    let (dataset, report) = normalize(raw, mode)?;
    info!(
        path = %path.display(),
        rows = report.total_rows,
        canonical = report.canonical_rows,
        "loaded shift records"
    );
    Ok(LoadedSource { dataset, report, fingerprint })
}

pub(crate) fn read_source(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ShiftError::SourceNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(e.into()),
    }
}
