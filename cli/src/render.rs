//! Renders a multiplication trace for terminal output.
//!
//! Rendering is kept out of the engine: each renderer consumes the
//! structured [`Multiplication`] result and writes to any stream.

use std::io::{self, Write};

use boothmul_engine::{Multiplication, TraceStep};
use serde_json::json;

/// Selects how a multiplication is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Undecorated fixed-width text.
    Plain,
    /// Box-drawn step table.
    Table,
    /// Machine-readable JSON.
    Json,
}

/// Writes a multiplication and its step trace to an output stream.
pub trait TraceRenderer {
    fn render(&self, result: &Multiplication, out: &mut dyn Write) -> io::Result<()>;
}

/// Returns the renderer for the requested format.
pub fn renderer_for(format: Format) -> Box<dyn TraceRenderer> {
    match format {
        Format::Plain => Box::new(PlainText),
        Format::Table => Box::new(StyledTable),
        Format::Json => Box::new(Json),
    }
}

/// Plain writer: header, one row per step plus its after-shift row,
/// then the product.
pub struct PlainText;

impl TraceRenderer for PlainText {
    fn render(&self, result: &Multiplication, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "Booth's algorithm: {} x {}",
            result.multiplicand, result.multiplier
        )?;
        writeln!(out, "M  = {} ({})", result.m, result.multiplicand)?;
        writeln!(out, "-M = {} ({})", result.neg_m, -result.multiplicand)?;
        writeln!(out, "Q  = {} ({})", result.q_initial, result.multiplier)?;
        writeln!(out)?;
        writeln!(out, "Step | A     | Q    | Q-1 | Q0Q-1 | Action")?;
        writeln!(out, "{}", "-".repeat(42))?;

        for step in &result.steps {
            writeln!(
                out,
                "{:>4} | {} | {} | {:^3} | {:^5} | {}",
                step.index,
                step.a_before,
                step.q_before,
                step.q_minus_1_before.to_string(),
                step.recode.to_string(),
                step.action
            )?;
            writeln!(
                out,
                "     | {} | {} | {:^3} |       | after shift",
                step.a_after,
                step.q_after,
                step.q_minus_1_after.to_string()
            )?;
        }

        writeln!(out)?;
        writeln!(out, "Product: {}", result.product)?;
        writeln!(out, "Binary (8-bit): {}", result.product_bits)?;
        writeln!(
            out,
            "Check: {} x {} = {}",
            result.multiplicand,
            result.multiplier,
            result.multiplicand * result.multiplier
        )?;
        Ok(())
    }
}

/// Styled writer: the same columns in a box-drawn table, the shifted
/// registers folded into one trailing column.
pub struct StyledTable;

/// Content width per column: step, A, Q, Q-1, pattern, action, after shift.
const COLUMNS: [usize; 7] = [4, 5, 4, 3, 5, 12, 12];

impl StyledTable {
    fn border(out: &mut dyn Write, left: char, mid: char, right: char) -> io::Result<()> {
        let mut line = String::new();
        line.push(left);
        for (i, width) in COLUMNS.iter().enumerate() {
            for _ in 0..width + 2 {
                line.push('─');
            }
            line.push(if i + 1 == COLUMNS.len() { right } else { mid });
        }
        writeln!(out, "{line}")
    }

    fn row(out: &mut dyn Write, cells: [&str; 7]) -> io::Result<()> {
        let mut line = String::new();
        line.push('│');
        for (&width, cell) in COLUMNS.iter().zip(cells) {
            line.push_str(&format!(" {cell:<width$} │"));
        }
        writeln!(out, "{line}")
    }

    fn step_cells(step: &TraceStep) -> [String; 7] {
        [
            step.index.to_string(),
            step.a_before.to_string(),
            step.q_before.to_string(),
            step.q_minus_1_before.to_string(),
            step.recode.to_string(),
            step.action.to_string(),
            format!("{} {} {}", step.a_after, step.q_after, step.q_minus_1_after),
        ]
    }
}

impl TraceRenderer for StyledTable {
    fn render(&self, result: &Multiplication, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "Booth's algorithm: {} x {}",
            result.multiplicand, result.multiplier
        )?;
        writeln!(out, "Multiplicand (M): {} ({})", result.m, result.multiplicand)?;
        writeln!(out, "Negated (-M):     {} ({})", result.neg_m, -result.multiplicand)?;
        writeln!(out, "Multiplier (Q):   {} ({})", result.q_initial, result.multiplier)?;

        Self::border(out, '┌', '┬', '┐')?;
        Self::row(
            out,
            ["Step", "A", "Q", "Q-1", "Q0Q-1", "Action", "After shift"],
        )?;
        Self::border(out, '├', '┼', '┤')?;
        for step in &result.steps {
            let cells = Self::step_cells(step);
            Self::row(
                out,
                [
                    cells[0].as_str(),
                    cells[1].as_str(),
                    cells[2].as_str(),
                    cells[3].as_str(),
                    cells[4].as_str(),
                    cells[5].as_str(),
                    cells[6].as_str(),
                ],
            )?;
        }
        Self::border(out, '└', '┴', '┘')?;

        writeln!(out, "Product (binary):  {}", result.product_bits)?;
        writeln!(out, "Product (decimal): {}", result.product)?;
        writeln!(
            out,
            "Check: {} x {} = {}",
            result.multiplicand,
            result.multiplier,
            result.multiplicand * result.multiplier
        )?;
        Ok(())
    }
}

/// JSON writer for machine consumption.
pub struct Json;

impl TraceRenderer for Json {
    fn render(&self, result: &Multiplication, out: &mut dyn Write) -> io::Result<()> {
        let steps: Vec<serde_json::Value> = result
            .steps
            .iter()
            .map(|step| {
                json!({
                    "step": step.index,
                    "a": step.a_before.to_string(),
                    "q": step.q_before.to_string(),
                    "q_minus_1": step.q_minus_1_before.to_string(),
                    "pattern": step.recode.to_string(),
                    "action": step.action.to_string(),
                    "a_after": step.a_after.to_string(),
                    "q_after": step.q_after.to_string(),
                    "q_minus_1_after": step.q_minus_1_after.to_string(),
                })
            })
            .collect();

        let report = json!({
            "multiplicand": result.multiplicand,
            "multiplier": result.multiplier,
            "m": result.m.to_string(),
            "neg_m": result.neg_m.to_string(),
            "q_initial": result.q_initial.to_string(),
            "steps": steps,
            "product": result.product,
            "product_binary": result.product_bits.to_string(),
        });

        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_default()
        )
    }
}
