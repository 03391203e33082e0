//! Read-eval-print loop and one-shot evaluation

use std::io::{self, BufRead, Write};
use basis::{Converter, Renderer};
use tracing::debug;

pub const PROMPT: &str = "Enter expression: ";

/// Convert one expression and write the rendered outcome.
/// Returns whether the conversion succeeded.
pub fn evaluate<W: Write>(
    converter: &Converter,
    renderer: &Renderer,
    expression: &str,
    out: &mut W,
) -> io::Result<bool> {
    let result = converter.convert(expression);
    if let Err(e) = &result {
        debug!(expression, error = %e, "conversion failed");
    }
    writeln!(out, "{}", renderer.render_result(&result))?;
    Ok(result.is_ok())
}

/// Prompt for expressions until `q`, `Q` or end of input
pub fn run<R: BufRead, W: Write>(
    converter: &Converter,
    renderer: &Renderer,
    mut input: R,
    out: &mut W,
) -> io::Result<()> {
    let mut line = String::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // leave the terminal on a fresh line
            writeln!(out)?;
            return Ok(());
        }

        let expression = line.trim();
        if expression.eq_ignore_ascii_case("q") {
            return Ok(());
        }
        if expression.is_empty() {
            continue;
        }

        evaluate(converter, renderer, expression, out)?;
        writeln!(out)?;
    }
}
