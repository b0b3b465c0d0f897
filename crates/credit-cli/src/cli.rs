//! CLI argument definitions for the credit risk scorer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use credit_ingest::{DEFAULT_PREVIEW_ROWS, SAMPLE_FILE_NAME};
use credit_model::{BorrowerField, ColumnMapping};

#[derive(Parser)]
#[command(
    name = "credit-score",
    version,
    about = "Credit risk scoring - predict borrower default from a CSV upload",
    long_about = "Score borrowers for credit risk.\n\n\
                  Map the columns of any CSV onto the six model fields, predict the\n\
                  probability of default, and report risk bands (Low < 0.4 <= Medium\n\
                  < 0.7 <= High), the score distribution and, when a Defaulted column\n\
                  is present, a confusion matrix."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow borrower values in debug and trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the sample CSV template.
    Template(TemplateArgs),

    /// List the borrower fields the model expects.
    Fields,

    /// Preview an upload and suggest a column mapping.
    Inspect(InspectArgs),

    /// Map, score and report on an upload.
    Score(ScoreArgs),
}

#[derive(Args)]
pub struct TemplateArgs {
    /// Destination file.
    #[arg(long = "output", value_name = "PATH", default_value = SAMPLE_FILE_NAME)]
    pub output: PathBuf,

    /// Leave out the Defaulted outcome column.
    #[arg(long = "no-defaulted")]
    pub no_defaulted: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Borrower CSV file.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Number of rows to preview.
    #[arg(long = "rows", value_name = "N", default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub rows: usize,
}

#[derive(Args)]
pub struct ScoreArgs {
    /// Borrower CSV file.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Model artifact (JSON). Defaults to the bundled model.
    #[arg(long = "model", value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Saved column selections (JSON object keyed by field).
    #[arg(long = "mapping-file", value_name = "PATH")]
    pub mapping_file: Option<PathBuf>,

    /// Column holding the borrower's age.
    #[arg(long = "age", value_name = "COLUMN")]
    pub age: Option<String>,

    /// Column holding monthly income.
    #[arg(long = "monthly-income", value_name = "COLUMN")]
    pub monthly_income: Option<String>,

    /// Column holding total debt.
    #[arg(long = "total-debt", value_name = "COLUMN")]
    pub total_debt: Option<String>,

    /// Column holding credit utilization.
    #[arg(long = "credit-utilization", value_name = "COLUMN")]
    pub credit_utilization: Option<String>,

    /// Column holding the count of missed payments.
    #[arg(long = "missed-payments", value_name = "COLUMN")]
    pub missed_payments: Option<String>,

    /// Column holding the number of credit lines.
    #[arg(long = "credit-lines", value_name = "COLUMN")]
    pub credit_lines: Option<String>,

    /// Fill still-unselected fields from confident name matches.
    #[arg(long = "auto-map")]
    pub auto_map: bool,

    /// Prompt for any field that is still unselected.
    #[arg(long = "interactive")]
    pub interactive: bool,

    /// Also write the scored table to this CSV file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl ScoreArgs {
    /// Selections given as flags; fields without a flag stay unselected.
    #[must_use]
    pub fn flag_mapping(&self) -> ColumnMapping {
        let flags = [
            (BorrowerField::Age, &self.age),
            (BorrowerField::MonthlyIncome, &self.monthly_income),
            (BorrowerField::TotalDebt, &self.total_debt),
            (BorrowerField::CreditUtilization, &self.credit_utilization),
            (BorrowerField::MissedPayments, &self.missed_payments),
            (BorrowerField::CreditLines, &self.credit_lines),
        ];
        let mut mapping = ColumnMapping::new();
        for (field, column) in flags {
            if let Some(column) = column {
                mapping.select(field, column.clone());
            }
        }
        mapping
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
