//! Shared utilities for the credit scoring crates.
//!
//! This crate provides the Polars `AnyValue` conversions used when rendering
//! cells, writing CSV output and reading ground-truth labels.

pub mod values;

pub use values::{any_to_binary_label, any_to_f64, any_to_string, format_numeric, parse_f64};
