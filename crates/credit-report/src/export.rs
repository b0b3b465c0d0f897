//! CSV export of the scored table.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use polars::prelude::DataFrame;
use tracing::info;

use credit_common::any_to_string;

use crate::error::{ReportError, Result};

/// Writes `frame` as CSV with a header row. Nulls become empty fields.
///
/// Returns the number of data rows written.
pub fn write_scored_csv<W: Write>(frame: &DataFrame, writer: W) -> Result<usize> {
    let mut out = csv::Writer::from_writer(writer);
    let header: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    out.write_record(&header)?;

    let columns = frame.get_columns();
    let mut record: Vec<String> = Vec::with_capacity(columns.len());
    for row in 0..frame.height() {
        record.clear();
        for column in columns {
            let value = column.get(row).map_err(|e| ReportError::Frame {
                message: e.to_string(),
            })?;
            record.push(any_to_string(value));
        }
        out.write_record(&record)?;
    }
    out.flush().map_err(|source| ReportError::Csv {
        source: source.into(),
    })?;
    Ok(frame.height())
}

pub fn write_scored_csv_file(frame: &DataFrame, path: &Path) -> Result<usize> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = write_scored_csv(frame, file)?;
    info!(path = %path.display(), rows, "scored results written");
    Ok(rows)
}
