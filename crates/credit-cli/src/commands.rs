use std::io::{self, IsTerminal};

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Table};
use tracing::{debug, info, info_span, warn};

use credit_common::any_to_string;
use credit_ingest::{UploadedTable, write_template_file};
use credit_map::{
    ConfidenceLevel, MappingSuggestions, SuggestionEngine, build_column_hints, load_mapping_file,
};
use credit_model::{BorrowerField, ColumnMapping, LoadedModel};
use credit_report::{
    ScoreReport, Styling, apply_table_style, header_cell, render_frame_table,
    write_scored_csv_file,
};

use credit_cli::interactive::prompt_for_unselected;
use credit_cli::logging::redact_value;
use credit_cli::session::ScoringSession;

use crate::cli::{InspectArgs, ScoreArgs, TemplateArgs};

/// Suggestions at or above this level are applied by `--auto-map`.
const AUTO_MAP_MIN_LEVEL: ConfidenceLevel = ConfidenceLevel::Medium;

pub fn run_template(args: &TemplateArgs) -> Result<()> {
    let rows = write_template_file(&args.output, !args.no_defaulted)
        .with_context(|| format!("write template {}", args.output.display()))?;
    println!("Wrote {rows} sample rows to {}", args.output.display());
    Ok(())
}

pub fn run_fields(styling: Styling) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    styling.apply(&mut table);
    for field in BorrowerField::ALL {
        table.add_row(vec![field.label(), field.canonical_name(), field.description()]);
    }
    println!("{table}");
    println!("Optionally include a 'Defaulted' column (0/1) to see a confusion matrix.");
    Ok(())
}

pub fn run_inspect(args: &InspectArgs, styling: Styling) -> Result<()> {
    let upload = UploadedTable::load(&args.csv)
        .with_context(|| format!("load {}", args.csv.display()))?;
    println!(
        "{}: {} rows, {} columns",
        upload.source().display(),
        upload.row_count(),
        upload.columns().len()
    );

    let preview = upload.preview(args.rows);
    let table = render_frame_table(&preview, styling).context("render preview")?;
    println!("{table}");

    let suggestions = suggest(&upload);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Suggested column"),
        header_cell("Confidence"),
    ]);
    apply_table_style(&mut table);
    styling.apply(&mut table);
    for field in BorrowerField::ALL {
        match suggestions.get(field) {
            Some(suggestion) => table.add_row(vec![
                Cell::new(field.label()),
                Cell::new(&suggestion.column),
                Cell::new(format!(
                    "{:.2} ({})",
                    suggestion.confidence,
                    suggestion.level.as_str()
                )),
            ]),
            None => table.add_row(vec![Cell::new(field.label()), Cell::new("-"), Cell::new("-")]),
        };
    }
    println!();
    println!("Suggested mapping:");
    println!("{table}");
    if !suggestions.unmapped_columns.is_empty() {
        println!("Other columns: {}", suggestions.unmapped_columns.join(", "));
    }
    if upload.has_ground_truth() {
        println!("A 'Defaulted' column is present: scoring will include a confusion matrix.");
    }
    Ok(())
}

pub fn run_score(args: &ScoreArgs, styling: Styling) -> Result<()> {
    let model = LoadedModel::load(args.model.as_deref()).context("load model")?;
    let upload = UploadedTable::load(&args.csv)
        .with_context(|| format!("load {}", args.csv.display()))?;
    let span = info_span!("score_command", source = %upload.source().display());
    let _guard = span.enter();

    let mapping = resolve_mapping(args, &upload)?;
    log_first_row(&upload, &mapping);

    let mut session = ScoringSession::new(&model);
    session.upload(upload);
    session
        .set_mapping(mapping)
        .context("apply column selections")?;
    if !session.mapping().is_complete() {
        let unmapped: Vec<&str> = session
            .mapping()
            .unselected_fields()
            .iter()
            .map(|field| field.label())
            .collect();
        warn!(unmapped = ?unmapped, "mapping incomplete");
        if let Some(upload) = session.upload_table() {
            eprintln!("Available columns: {}", upload.columns().join(", "));
        }
    }

    let scored = session.score()?;
    let report = ScoreReport::build(scored).context("build report")?;
    print!("{}", report.render(scored, styling)?);

    if let Some(path) = &args.output {
        write_scored_csv_file(scored.frame(), path)
            .with_context(|| format!("write results {}", path.display()))?;
        println!("Scored results written to {}", path.display());
    }
    Ok(())
}

/// Mapping file first, then explicit flags, then `--auto-map`, then prompts.
fn resolve_mapping(args: &ScoreArgs, upload: &UploadedTable) -> Result<ColumnMapping> {
    let mut mapping = match &args.mapping_file {
        Some(path) => load_mapping_file(path)
            .with_context(|| format!("load mapping file {}", path.display()))?,
        None => ColumnMapping::new(),
    };
    mapping.overlay(&args.flag_mapping());

    if args.auto_map {
        let filled = suggest(upload).apply_to(&mut mapping, AUTO_MAP_MIN_LEVEL);
        for field in &filled {
            info!(
                field = %field,
                column = mapping.get(*field).as_selected().unwrap_or_default(),
                "field auto-mapped"
            );
        }
    }

    if args.interactive && !mapping.is_complete() {
        if !io::stdin().is_terminal() {
            bail!("--interactive needs a terminal on stdin");
        }
        let columns = upload.columns();
        prompt_for_unselected(&mut mapping, &columns, io::stdin().lock(), io::stderr())
            .context("read column selections")?;
    }
    Ok(mapping)
}

fn suggest(upload: &UploadedTable) -> MappingSuggestions {
    SuggestionEngine::default()
        .with_hints(build_column_hints(upload.frame()))
        .suggest(&upload.columns())
}

fn log_first_row(upload: &UploadedTable, mapping: &ColumnMapping) {
    for (field, selection) in mapping.iter() {
        let Some(column) = selection.as_selected() else {
            continue;
        };
        let value = upload
            .frame()
            .column(column)
            .ok()
            .and_then(|col| col.get(0).ok())
            .map(any_to_string)
            .unwrap_or_default();
        debug!(
            field = %field,
            column,
            first_value = redact_value(&value),
            "field selection"
        );
    }
}
