//! Bundled sample data offered as a download template.

use std::fs::File;
use std::io;
use std::path::Path;

use tracing::info;

use credit_model::{BorrowerField, GROUND_TRUTH_COLUMN};

use crate::error::{IngestError, Result};

/// Default file name for the downloaded sample.
pub const SAMPLE_FILE_NAME: &str = "sample_credit_data.csv";

const SAMPLE_CSV: &str = include_str!("../data/sample_credit_data.csv");

/// Template columns: the six field labels, optionally followed by `Defaulted`.
#[must_use]
pub fn template_headers(include_ground_truth: bool) -> Vec<&'static str> {
    let mut headers: Vec<&'static str> = BorrowerField::ALL
        .iter()
        .map(|field| field.label())
        .collect();
    if include_ground_truth {
        headers.push(GROUND_TRUTH_COLUMN);
    }
    headers
}

/// Writes the sample rows restricted to the template columns.
///
/// Returns the number of data rows written.
pub fn write_template<W: io::Write>(writer: W, include_ground_truth: bool) -> Result<usize> {
    let mut reader = csv::Reader::from_reader(SAMPLE_CSV.as_bytes());
    let sample_headers = reader
        .headers()
        .map_err(|source| IngestError::Template { source })?
        .clone();
    let wanted = template_headers(include_ground_truth);
    let mut indices = Vec::with_capacity(wanted.len());
    for column in &wanted {
        let idx = sample_headers
            .iter()
            .position(|header| header == *column)
            .ok_or_else(|| IngestError::MissingSampleColumn {
                column: (*column).to_string(),
            })?;
        indices.push(idx);
    }

    let mut out = csv::Writer::from_writer(writer);
    out.write_record(&wanted)
        .map_err(|source| IngestError::Template { source })?;
    let mut rows = 0usize;
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Template { source })?;
        let row: Vec<&str> = indices
            .iter()
            .map(|idx| record.get(*idx).unwrap_or(""))
            .collect();
        out.write_record(&row)
            .map_err(|source| IngestError::Template { source })?;
        rows += 1;
    }
    out.flush().map_err(|source| IngestError::Template {
        source: source.into(),
    })?;
    Ok(rows)
}

/// Writes the template to `path`, creating or truncating it.
pub fn write_template_file(path: &Path, include_ground_truth: bool) -> Result<usize> {
    let file = File::create(path).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = write_template(file, include_ground_truth)?;
    info!(
        path = %path.display(),
        rows,
        include_ground_truth,
        "sample template written"
    );
    Ok(rows)
}
