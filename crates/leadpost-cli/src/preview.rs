//! Operator preview and confirmation before any row is posted.

use std::io::{self, BufRead, Write};

use comfy_table::presets::NOTHING;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use leadpost_model::{Dataset, FieldSchema};
use leadpost_submit::RoutePlan;

/// Shown next to empty cells in the preview.
pub const EMPTY_NOTE: &str = "(empty, will not be posted)";

/// Answer to the single yes/no gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Proceed,
    Decline,
}

/// Answer to the stepwise prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepChoice {
    Halt,
    One,
    All,
}

/// Render one row as `field: value` pairs with right-aligned field names.
pub fn render_row(
    out: &mut dyn Write,
    schema: &FieldSchema,
    row_number: usize,
    row: &[String],
    url: &str,
) -> io::Result<()> {
    writeln!(out, "posting URL: {url}")?;
    writeln!(
        out,
        "preview of row #{row_number} (note: empty values will not be posted)"
    )?;
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled);
    for (name, value) in schema.names.iter().zip(row) {
        let value_cell = if value.is_empty() {
            Cell::new(EMPTY_NOTE).fg(Color::DarkGrey)
        } else {
            Cell::new(value)
        };
        table.add_row(vec![
            Cell::new(format!("{name}:")).add_attribute(Attribute::Bold),
            value_cell,
        ]);
    }
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    writeln!(out, "{table}")?;
    writeln!(out)
}

/// Read one answer line. `None` means the input was closed.
fn read_answer(input: &mut dyn BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

/// Ask whether to post every row. Empty input or `y` proceeds; anything
/// else, including closed input, declines.
pub fn confirm_all(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    row_count: usize,
) -> io::Result<Confirmation> {
    write!(out, "proceed with posting all {row_count} rows? [Y/n]: ")?;
    out.flush()?;
    Ok(match read_answer(input)?.as_deref() {
        Some("" | "y") => Confirmation::Proceed,
        _ => Confirmation::Decline,
    })
}

/// Ask whether to post none, one, or all remaining rows. Anything
/// unrecognized halts.
pub fn choose_step(input: &mut dyn BufRead, out: &mut dyn Write) -> io::Result<StepChoice> {
    write!(
        out,
        "proceed with posting 0, 1, or All remaining rows? (enter 0, 1, or A): "
    )?;
    out.flush()?;
    Ok(match read_answer(input)?.as_deref() {
        Some("1") => StepChoice::One,
        Some("a") => StepChoice::All,
        _ => StepChoice::Halt,
    })
}

/// The single preview gate: show `preview_row` (1-based) with its URL, then
/// ask for confirmation. A row number past the end of the file is reported
/// and the prompt still follows.
pub fn run_gate(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    dataset: &Dataset,
    schema: &FieldSchema,
    plan: &RoutePlan,
    preview_row: usize,
) -> io::Result<Confirmation> {
    match dataset.row(preview_row) {
        Some(row) => render_row(out, schema, preview_row, row, &plan.url_for(row))?,
        None => writeln!(
            out,
            "preview row #{preview_row} not found (file has {} data rows)",
            dataset.row_count()
        )?,
    }
    confirm_all(input, out, dataset.row_count())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn answer(text: &str) -> Confirmation {
        let mut input = Cursor::new(text.as_bytes().to_vec());
        let mut out = Vec::new();
        confirm_all(&mut input, &mut out, 3).expect("prompt")
    }

    fn step(text: &str) -> StepChoice {
        let mut input = Cursor::new(text.as_bytes().to_vec());
        let mut out = Vec::new();
        choose_step(&mut input, &mut out).expect("prompt")
    }

    #[test]
    fn gate_accepts_empty_and_y() {
        assert_eq!(answer("\n"), Confirmation::Proceed);
        assert_eq!(answer("y\n"), Confirmation::Proceed);
        assert_eq!(answer("  Y \r\n"), Confirmation::Proceed);
    }

    #[test]
    fn gate_declines_everything_else() {
        assert_eq!(answer("n\n"), Confirmation::Decline);
        assert_eq!(answer("yes\n"), Confirmation::Decline);
        assert_eq!(answer(""), Confirmation::Decline);
    }

    #[test]
    fn step_choices() {
        assert_eq!(step("1\n"), StepChoice::One);
        assert_eq!(step("A\n"), StepChoice::All);
        assert_eq!(step("a\n"), StepChoice::All);
        assert_eq!(step("0\n"), StepChoice::Halt);
        assert_eq!(step("\n"), StepChoice::Halt);
        assert_eq!(step(""), StepChoice::Halt);
    }
}
