use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Per-file failures
// ---------------------------------------------------------------------------

/// Everything that can stop a single input file from producing a report.
///
/// None of these abort the run: the driver logs them and moves on to the
/// next file.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unable to open file {path}")]
    FileNotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input in {path}")]
    MalformedRow {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    #[error("no categories to be written for {path}")]
    EmptyResultSet { path: PathBuf },

    #[error("cannot write {path}: {reason}")]
    OutputWriteFailure { path: PathBuf, reason: String },

    #[error("cannot render chart {chart}: {reason}")]
    RenderFailure { chart: String, reason: String },
}

impl ReportError {
    pub fn output(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ReportError::OutputWriteFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Why a log could not be split into a header and rows.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("CSV row {row}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("missing header row")]
    MissingHeader,
}

// ---------------------------------------------------------------------------
// Column-level failures (never fatal for the file)
// ---------------------------------------------------------------------------

/// Why a column could not be turned into a sample vector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColumnError {
    #[error("column has no rows")]
    Empty,

    #[error("row {row}: '{value}' is not a finite number")]
    NonNumeric { row: usize, value: String },
}

/// Failures of the derived-series operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("at least one element is required to calculate an average")]
    Empty,
}
