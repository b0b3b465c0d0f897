//! Terminal rendering of scored results.

use std::collections::BTreeMap;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use credit_common::any_to_string;
use credit_model::RiskCategory;
use credit_score::{PREDICTED_PROB_COLUMN, RISK_CATEGORY_COLUMN, ScoredFrame};

use crate::confusion::ConfusionMatrix;
use crate::error::{ReportError, Result};
use crate::histogram::{Histogram, HistogramBin};

pub const HISTOGRAM_TITLE: &str = "Predicted Probability of Default";
const CONFUSION_TITLE: &str = "Confusion Matrix";

/// Character width of the longest histogram bar.
const HISTOGRAM_BAR_WIDTH: usize = 40;
const BAR_FILL: char = '█';
const DENSITY_MARKER: char = '●';

/// Lightest and darkest shades of the confusion matrix heatmap.
const HEAT_LIGHT: (u8, u8, u8) = (222, 235, 247);
const HEAT_DARK: (u8, u8, u8) = (8, 81, 156);

/// Whether table cells carry ANSI styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Styling {
    /// Style only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl Styling {
    pub fn apply(self, table: &mut Table) {
        match self {
            Self::Auto => {}
            Self::Always => {
                table.enforce_styling();
            }
            Self::Never => {
                table.force_no_tty();
            }
        }
    }
}

/// Histogram and confusion matrix for one scoring run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    histogram: Option<Histogram>,
    confusion: Option<ConfusionMatrix>,
}

impl ScoreReport {
    pub fn build(scored: &ScoredFrame) -> Result<Self> {
        let probabilities: Vec<f64> = scored.rounded_probabilities().collect();
        Ok(Self {
            histogram: Histogram::from_values(&probabilities),
            confusion: ConfusionMatrix::from_frame(scored.frame())?,
        })
    }

    #[must_use]
    pub fn histogram(&self) -> Option<&Histogram> {
        self.histogram.as_ref()
    }

    /// `None` when the upload had no `Defaulted` column.
    #[must_use]
    pub fn confusion(&self) -> Option<&ConfusionMatrix> {
        self.confusion.as_ref()
    }

    /// Results table, then the distribution chart, then the confusion matrix
    /// when ground truth exists, then the per-category summary.
    pub fn render(&self, scored: &ScoredFrame, styling: Styling) -> Result<String> {
        let mut out = format!("{}\n", render_results_table(scored, styling)?);
        if let Some(histogram) = &self.histogram {
            out.push('\n');
            out.push_str(&render_histogram(histogram));
        }
        if let Some(matrix) = &self.confusion {
            out.push_str(&format!(
                "\n{CONFUSION_TITLE}\n{}\n",
                render_confusion_matrix(matrix, styling)
            ));
            if matrix.skipped() > 0 {
                out.push_str(&format!(
                    "{} row(s) without a 0/1 outcome were left out.\n",
                    matrix.skipped()
                ));
            }
        }
        out.push_str(&format!(
            "\n{}\n",
            render_category_summary(&scored.category_counts())
        ));
        Ok(out)
    }
}

/// Renders every row and column of `frame`.
///
/// A `Risk_Category` column is coloured by band and numeric columns are
/// right-aligned.
pub fn render_frame_table(frame: &DataFrame, styling: Styling) -> Result<Table> {
    let mut table = Table::new();
    table.set_header(
        frame
            .get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    styling.apply(&mut table);

    let columns = frame.get_columns();
    for (idx, column) in columns.iter().enumerate() {
        if column.dtype().is_primitive_numeric() {
            align_column(&mut table, idx, CellAlignment::Right);
        }
    }

    for row in 0..frame.height() {
        let mut cells = Vec::with_capacity(columns.len());
        for column in columns {
            let value = column.get(row).map_err(|e| ReportError::Frame {
                message: e.to_string(),
            })?;
            let text = any_to_string(value);
            let cell = if column.name().as_str() == RISK_CATEGORY_COLUMN {
                risk_cell(&text)
            } else {
                Cell::new(text)
            };
            cells.push(cell);
        }
        table.add_row(cells);
    }
    Ok(table)
}

pub fn render_results_table(scored: &ScoredFrame, styling: Styling) -> Result<Table> {
    let frame = scored.frame();
    if frame.column(PREDICTED_PROB_COLUMN).is_err() {
        return Err(ReportError::MissingColumn {
            column: PREDICTED_PROB_COLUMN.to_string(),
        });
    }
    render_frame_table(frame, styling)
}

/// Text bar chart of the distribution with the KDE marked on each bar.
#[must_use]
pub fn render_histogram(histogram: &Histogram) -> String {
    let peak = histogram.peak();
    let mut out = format!("{HISTOGRAM_TITLE}\n");
    for bin in histogram.bins() {
        out.push_str(&format!(
            "{:.2}-{:.2} │{}│ {}\n",
            bin.lower,
            bin.upper,
            histogram_bar(bin, peak, HISTOGRAM_BAR_WIDTH),
            bin.count
        ));
    }
    if histogram.has_density() {
        out.push_str(&format!("{BAR_FILL} count  {DENSITY_MARKER} density (KDE)\n"));
    } else {
        out.push_str(&format!("{BAR_FILL} count\n"));
    }
    out
}

fn histogram_bar(bin: &HistogramBin, peak: f64, width: usize) -> String {
    let scale = if peak > 0.0 { width as f64 / peak } else { 0.0 };
    let filled = ((bin.count as f64 * scale).round() as usize).min(width);
    let mut cells: Vec<char> = (0..width)
        .map(|i| if i < filled { BAR_FILL } else { ' ' })
        .collect();
    if let Some(density) = bin.density
        && width > 0
    {
        let position = ((density * scale).round() as usize).clamp(1, width);
        cells[position - 1] = DENSITY_MARKER;
    }
    cells.into_iter().collect()
}

/// Annotated heatmap with `Predicted` across and `Actual` down.
#[must_use]
pub fn render_confusion_matrix(matrix: &ConfusionMatrix, styling: Styling) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("Predicted: 0"),
        header_cell("Predicted: 1"),
    ]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Disabled);
    styling.apply(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);

    let max = matrix.max_cell();
    for actual in 0..=1u8 {
        table.add_row(vec![
            header_cell(&format!("Actual: {actual}")),
            heat_cell(matrix.get(actual, 0), max),
            heat_cell(matrix.get(actual, 1), max),
        ]);
    }
    table
}

/// One line with the row count per risk band.
#[must_use]
pub fn render_category_summary(counts: &BTreeMap<RiskCategory, usize>) -> String {
    let parts: Vec<String> = RiskCategory::ALL
        .iter()
        .map(|risk| format!("{risk}: {}", counts.get(risk).copied().unwrap_or(0)))
        .collect();
    format!("Risk summary: {}", parts.join(", "))
}

fn heat_cell(count: usize, max: usize) -> Cell {
    let t = if max == 0 {
        0.0
    } else {
        count as f64 / max as f64
    };
    let mix = |light: u8, dark: u8| {
        (f64::from(light) + (f64::from(dark) - f64::from(light)) * t).round() as u8
    };
    let background = Color::Rgb {
        r: mix(HEAT_LIGHT.0, HEAT_DARK.0),
        g: mix(HEAT_LIGHT.1, HEAT_DARK.1),
        b: mix(HEAT_LIGHT.2, HEAT_DARK.2),
    };
    let foreground = if t > 0.5 { Color::White } else { Color::Black };
    Cell::new(count)
        .bg(background)
        .fg(foreground)
        .add_attribute(Attribute::Bold)
}

fn risk_cell(text: &str) -> Cell {
    let color = match text {
        "Low" => Color::Green,
        "Medium" => Color::Yellow,
        "High" => Color::Red,
        _ => return Cell::new(text),
    };
    Cell::new(text).fg(color).add_attribute(Attribute::Bold)
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Rounded condensed borders shared by every listing table.
pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(200);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_peak_and_marks_density() {
        let bin = HistogramBin {
            lower: 0.0,
            upper: 0.1,
            count: 2,
            density: Some(3.0),
        };
        assert_eq!(histogram_bar(&bin, 4.0, 10), "█████  ●  ");
    }

    #[test]
    fn empty_bin_without_density_is_blank() {
        let bin = HistogramBin {
            lower: 0.0,
            upper: 0.1,
            count: 0,
            density: None,
        };
        assert_eq!(histogram_bar(&bin, 4.0, 5), "     ");
    }

    #[test]
    fn summary_lists_every_band() {
        let counts = BTreeMap::from([(RiskCategory::High, 2)]);
        assert_eq!(
            render_category_summary(&counts),
            "Risk summary: Low: 0, Medium: 0, High: 2"
        );
    }
}
