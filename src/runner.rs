use crate::interpreter::{Effect, Interpreter};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Runs every line of `source` against one interpreter, writing output to stdout.
///
/// Errors are reported per line and execution continues with the next line.
/// Returns the number of lines that failed.
pub fn run(source: &str, filename: Option<&str>) -> io::Result<usize> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_reader(source.as_bytes(), &mut out, filename)
}

/// Same as [`run`] but pulls lines from any reader and writes to any sink.
///
/// Failing to read input or to write output stops the run with that error.
pub fn run_reader<R: BufRead, W: Write>(
    reader: R,
    out: &mut W,
    filename: Option<&str>,
) -> io::Result<usize> {
    let mut interpreter = Interpreter::new();

    let mut failures = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if !run_line(&mut interpreter, &line, index + 1, filename, out)? {
            failures += 1;
        }
    }
    out.flush()?;
    Ok(failures)
}

fn run_line<W: Write>(
    interpreter: &mut Interpreter,
    line: &str,
    line_number: usize,
    filename: Option<&str>,
    out: &mut W,
) -> io::Result<bool> {
    if line.trim().is_empty() {
        return Ok(true);
    }

    debug!(line_number, "running line");
    match interpreter.parse_statement(line) {
        Ok(Effect::Print(text)) => {
            writeln!(out, "{}", text)?;
            Ok(true)
        }
        Ok(Effect::Assign { .. }) => Ok(true),
        Err(error) => {
            error.report(line, filename, Some(line_number));
            Ok(false)
        }
    }
}
