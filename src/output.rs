use crate::crosstab::CrossTabMatrix;
use crate::error::Result;
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Write a matrix with the row label in the first column and one column per key.
pub fn write_matrix_csv<R, C>(path: impl AsRef<Path>, corner: &str, matrix: &CrossTabMatrix<R, C>) -> Result<()>
where
    R: Display,
    C: Display,
{
    let mut wtr = csv::Writer::from_path(path)?;
    for record in matrix_records(corner, matrix) {
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn matrix_records<R, C>(corner: &str, matrix: &CrossTabMatrix<R, C>) -> Vec<Vec<String>>
where
    R: Display,
    C: Display,
{
    let mut records = Vec::with_capacity(matrix.row_keys().len() + 1);
    let mut header = vec![corner.to_string()];
    header.extend(matrix.col_keys().iter().map(|c| c.to_string()));
    records.push(header);
    for (row_key, counts) in matrix.rows() {
        let mut record = vec![row_key.to_string()];
        record.extend(counts.iter().map(|c| c.to_string()));
        records.push(record);
    }
    records
}

pub fn render_matrix<R, C>(corner: &str, matrix: &CrossTabMatrix<R, C>) -> String
where
    R: Display,
    C: Display,
{
    if matrix.is_empty() {
        return "(no rows)".to_string();
    }
    let mut builder = Builder::default();
    for record in matrix_records(corner, matrix) {
        builder.push_record(record);
    }
    builder.build().with(Style::markdown()).to_string()
}

pub fn print_matrix<R, C>(corner: &str, matrix: &CrossTabMatrix<R, C>)
where
    R: Display,
    C: Display,
{
    println!("{}\n", render_matrix(corner, matrix));
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crosstab::build_matrix;
    use crate::types::{HourSlot, ShiftRecord};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn matrix() -> CrossTabMatrix<String, HourSlot> {
        let records = vec![
            ShiftRecord {
                guard_name: "Guard A".into(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                hour: HourSlot::parse("08:00").unwrap(),
                position: "Gate1".into(),
            },
            ShiftRecord {
                guard_name: "Guard B".into(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                hour: HourSlot::parse("09:00").unwrap(),
                position: "Gate2".into(),
            },
        ];
        build_matrix(&records, |r| r.guard_name.clone(), |r| r.hour.clone())
    }

    #[test]
    fn matrix_csv_has_header_and_zero_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("m.csv");
        write_matrix_csv(&path, "guard_name", &matrix()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, ["guard_name,08:00,09:00", "Guard A,1,0", "Guard B,0,1"]);
    }

    #[test]
    fn rendered_matrix_mentions_every_key() {
        let out = render_matrix("Guard", &matrix());
        for needle in ["Guard A", "Guard B", "08:00", "09:00"] {
            assert!(out.contains(needle), "missing {needle} in\n{out}");
        }
    }
}
