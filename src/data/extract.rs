use crate::error::ColumnError;

/// Parse one field as a finite `f64`.
fn parse_field(field: Option<&String>) -> Option<f64> {
    field
        .and_then(|f| f.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Turn column `index` of `rows` into a dense sample vector.
///
/// Row 0 is checked on its own first so that text columns are rejected
/// without scanning the rest of the file. A later row that fails to parse
/// (or is too short) rejects the whole column as well.
pub fn extract_column(rows: &[Vec<String>], index: usize) -> Result<Vec<f64>, ColumnError> {
    let first = rows.first().ok_or(ColumnError::Empty)?;
    if parse_field(first.get(index)).is_none() {
        return Err(non_numeric(0, first, index));
    }

    rows.iter()
        .enumerate()
        .map(|(row, fields)| {
            parse_field(fields.get(index)).ok_or_else(|| non_numeric(row, fields, index))
        })
        .collect()
}

fn non_numeric(row: usize, fields: &[String], index: usize) -> ColumnError {
    ColumnError::NonNumeric {
        row,
        value: fields.get(index).cloned().unwrap_or_default(),
    }
}
