//! Borrower data ingestion.
//!
//! This crate loads the user's CSV upload into a Polars `DataFrame` and
//! provides the bundled sample data offered as a download template.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use credit_ingest::{UploadedTable, write_template_file};
//!
//! write_template_file(Path::new("sample_credit_data.csv"), true)?;
//! let upload = UploadedTable::load(Path::new("borrowers.csv"))?;
//! println!("{:?}", upload.columns());
//! ```

mod error;
mod reader;
mod sample;
mod upload;

pub use error::{IngestError, Result};
pub use reader::read_csv_frame;
pub use sample::{SAMPLE_FILE_NAME, template_headers, write_template, write_template_file};
pub use upload::{DEFAULT_PREVIEW_ROWS, UploadedTable};
