//! Presentation of scored uploads.
//!
//! Builds the probability histogram (with a Gaussian KDE overlay) and the
//! optional confusion matrix, renders them for the terminal with
//! `comfy-table`, and exports the scored table as CSV.

pub mod confusion;
pub mod error;
pub mod export;
pub mod histogram;
pub mod render;

pub use confusion::ConfusionMatrix;
pub use error::{ReportError, Result};
pub use export::{write_scored_csv, write_scored_csv_file};
pub use histogram::{GaussianKde, HISTOGRAM_BINS, Histogram, HistogramBin};
pub use render::{
    HISTOGRAM_TITLE, ScoreReport, Styling, apply_table_style, header_cell,
    render_category_summary, render_confusion_matrix, render_frame_table, render_histogram,
    render_results_table,
};
