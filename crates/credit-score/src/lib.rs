//! Credit scoring pipeline.
//!
//! Takes the original upload and a complete column mapping, runs the model in
//! one batch, and appends `Predicted_Prob`, `Risk_Category` and
//! `Predicted_Default` to the original table. Either every row is scored or
//! an error is returned; results are never partially applied.

mod error;
mod features;
mod pipeline;
mod rounding;

pub use error::ScoringError;
pub use features::extract_features;
pub use pipeline::{
    PREDICTED_DEFAULT_COLUMN, PREDICTED_PROB_COLUMN, RISK_CATEGORY_COLUMN, ScoredFrame,
    ScoredRecord, ScoringPipeline,
};
pub use rounding::{PROBABILITY_DECIMALS, round_probability};
