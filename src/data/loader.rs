use std::io::Read;
use std::path::Path;

use log::debug;

use super::model::RawTable;
use crate::error::{ReportError, TableError};

/// vmstat prints a group line ("procs -----memory---- ...") above the real header.
pub const GROUP_HEADER_PREFIX: &str = "procs";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read a whitespace-separated monitoring log into a [`RawTable`].
///
/// Layout:
/// * optional vmstat group line starting with `procs` (skipped)
/// * header row with column names
/// * one row per sample
///
/// vmstat reprints its group line and header every screenful; those
/// repeats are dropped wherever they appear. Runs of spaces produce no empty
/// fields, so both single-space "CSV" and column-aligned `vmstat` / `jstat`
/// output are accepted.
pub fn load_table(path: &Path) -> Result<RawTable, ReportError> {
    let file = std::fs::File::open(path).map_err(|source| ReportError::FileNotReadable {
        path: path.to_path_buf(),
        source,
    })?;
    read_table(file).map_err(|source| ReportError::MalformedRow {
        path: path.to_path_buf(),
        source,
    })
}

/// Same as [`load_table`] but from any reader.
pub fn read_table<R: Read>(input: R) -> Result<RawTable, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .quote(b'"')
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut columns: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|source| TableError::Csv { row, source })?;
        let fields: Vec<String> = record
            .iter()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        // Blank lines carry no data.
        if fields.is_empty() {
            continue;
        }
        if fields[0].starts_with(GROUP_HEADER_PREFIX) {
            debug!("Skipping vmstat group header at row {row}");
            continue;
        }
        if columns.is_none() {
            debug!("Categories read from CSV: {fields:?}");
            columns = Some(fields);
        } else if columns.as_ref() == Some(&fields) {
            debug!("Skipping repeated header at row {row}");
        } else {
            rows.push(fields);
        }
    }

    let columns = columns.ok_or(TableError::MissingHeader)?;
    Ok(RawTable::new(columns, rows))
}
