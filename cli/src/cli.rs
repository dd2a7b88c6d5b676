//! Implements the command line behavior.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use boothmul_engine::Multiplication;

use crate::render::{renderer_for, Format};

/// Runs one multiplication and renders it to stdout.
///
/// When `dump_trace` is `Some(path)`, also writes one line per step
/// plus the product to the file.
pub fn multiply(
    multiplicand: i32,
    multiplier: i32,
    format: Format,
    dump_trace: Option<&Path>,
) -> Result<(), String> {
    let result = boothmul_engine::multiply(multiplicand, multiplier)
        .map_err(|e| format!("Unable to multiply: {e}"))?;

    let renderer = renderer_for(format);
    let stdout = std::io::stdout();
    renderer
        .render(&result, &mut stdout.lock())
        .map_err(|e| format!("Unable to write output: {e}"))?;

    if let Some(path) = dump_trace {
        dump_trace_file(&result, path)?;
    }

    Ok(())
}

fn dump_trace_file(result: &Multiplication, path: &Path) -> Result<(), String> {
    let mut out = File::create(path)
        .map_err(|e| format!("Unable to create trace file {}: {e}", path.display()))?;
    for step in &result.steps {
        writeln!(
            out,
            "step[{}]: A={} Q={} Q-1={} pattern={} action={} -> A={} Q={} Q-1={}",
            step.index,
            step.a_before,
            step.q_before,
            step.q_minus_1_before,
            step.recode,
            step.action,
            step.a_after,
            step.q_after,
            step.q_minus_1_after
        )
        .map_err(|e| format!("Unable to write trace file: {e}"))?;
    }
    writeln!(out, "product: {} ({})", result.product, result.product_bits)
        .map_err(|e| format!("Unable to write trace file: {e}"))?;
    Ok(())
}
