//! Terminal prompts for still-unselected fields.

use std::io::{self, BufRead, Write};

use credit_model::{BorrowerField, ColumnMapping};

/// Asks for a column for each unselected field.
///
/// Columns are offered as a numbered list; the answer may be the number or
/// the exact column name. An empty answer leaves the field unselected and an
/// unrecognised one is asked again. Stops quietly at end of input.
///
/// Returns the fields that were filled.
pub fn prompt_for_unselected<R: BufRead, W: Write>(
    mapping: &mut ColumnMapping,
    columns: &[String],
    mut input: R,
    mut output: W,
) -> io::Result<Vec<BorrowerField>> {
    let mut filled = Vec::new();
    let pending = mapping.unselected_fields();
    if pending.is_empty() {
        return Ok(filled);
    }

    writeln!(output, "Available columns:")?;
    for (idx, column) in columns.iter().enumerate() {
        writeln!(output, "  {:>2}) {column}", idx + 1)?;
    }

    'fields: for field in pending {
        loop {
            write!(
                output,
                "Column for {} ({}) [number or name, empty to skip]: ",
                field.label(),
                field.description()
            )?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break 'fields;
            }
            let answer = line.trim();
            if answer.is_empty() {
                break;
            }
            match resolve_answer(answer, columns) {
                Some(column) => {
                    mapping.select(field, column);
                    filled.push(field);
                    break;
                }
                None => writeln!(output, "  '{answer}' is not one of the listed columns")?,
            }
        }
    }
    Ok(filled)
}

fn resolve_answer(answer: &str, columns: &[String]) -> Option<String> {
    if let Ok(number) = answer.parse::<usize>()
        && let Some(column) = number.checked_sub(1).and_then(|idx| columns.get(idx))
    {
        return Some(column.clone());
    }
    columns.iter().find(|column| column.as_str() == answer).cloned()
}
