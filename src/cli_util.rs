use std::io::{self, Write};
use crate::config::Colors;
use crate::{BefungeError, Grid, Position};

/// Pretty-print a structured BefungeError with the offending grid row and a caret.
/// If `program` is `Some("befunge")`, messages are prefixed with "befunge: ...".
/// Colors are applied only when `colors` is given.
pub fn print_interpreter_error(program: Option<&str>, grid: &Grid, err: &BefungeError, colors: Option<&Colors>) {
    eprint!("{}", render_error(program, grid, err, colors));
    let _ = io::stderr().flush();
}

/// Build the text printed by [`print_interpreter_error`].
pub fn render_error(program: Option<&str>, grid: &Grid, err: &BefungeError, colors: Option<&Colors>) -> String {
    let prefix_program = |msg: &str| {
        if let Some(p) = program {
            format!("{p}: {msg}")
        } else {
            msg.to_string()
        }
    };

    let msg = match err {
        BefungeError::StackUnderflow { op, .. } => {
            format!("Runtime error: stack underflow (op={op})")
        }
        BefungeError::OutOfBounds { x, y, .. } => format!(
            "Runtime error: cell ({x}, {y}) is outside the {}x{} grid",
            grid.width(),
            grid.height()
        ),
        BefungeError::DivisionByZero { op, .. } => {
            format!("Runtime error: division by zero (op={op})")
        }
        BefungeError::MalformedInput { reason, .. } => format!("Input error: {reason}"),
        BefungeError::Io { source, .. } => format!("I/O error: {source}"),
        BefungeError::StepLimitExceeded { limit } => {
            format!("Execution aborted: step limit exceeded ({limit})")
        }
    };
    let msg = prefix_program(&msg);

    match err.position() {
        Some(at) => render_with_context(&msg, grid, at, colors),
        None => format!("{}\n", paint(colors.map(|c| c.error), &msg)),
    }
}

/// A headline naming the position, then a window of the row the cursor was on
/// with a caret under the cell.
fn render_with_context(headline: &str, grid: &Grid, at: Position, colors: Option<&Colors>) -> String {
    let mut out = format!(
        "{} at {}\n",
        paint(colors.map(|c| c.error), headline),
        paint(colors.map(|c| c.location), &at.to_string())
    );

    // Show a short window around the position for context
    const WINDOW_CHARS: usize = 32;

    let (Ok(x), Ok(y)) = (usize::try_from(at.x), usize::try_from(at.y)) else {
        return out;
    };
    let Some(row) = grid.row_text(y) else {
        return out;
    };

    let chars: Vec<char> = row.chars().collect();
    let start = x.saturating_sub(WINDOW_CHARS);
    let end = (x + WINDOW_CHARS + 1).min(chars.len());
    let slice: String = chars.get(start..end).map(|s| s.iter().collect()).unwrap_or_default();

    out.push_str(&format!("  {}\n", paint(colors.map(|c| c.source), &slice)));

    // Caret under the exact position
    let underline = format!("{}^", " ".repeat(x - start));
    out.push_str(&format!("  {}\n", paint(colors.map(|c| c.caret), &underline)));
    out
}

fn paint(color: Option<nu_ansi_term::Color>, text: &str) -> String {
    match color {
        Some(c) => c.paint(text).to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InputFault;

    #[test]
    fn underflow_shows_row_and_caret() {
        let grid = Grid::from_source("12\n  . @");
        let err = BefungeError::StackUnderflow { at: Position::new(2, 1), op: '.' };
        let text = render_error(Some("befunge"), &grid, &err, None);
        assert_eq!(
            text,
            "befunge: Runtime error: stack underflow (op=.) at (2, 1)\n    . @\n    ^\n"
        );
    }

    #[test]
    fn long_rows_are_windowed_around_the_cell() {
        let source = format!("{}%{}", "1".repeat(40), "2".repeat(40));
        let grid = Grid::from_source(&source);
        let err = BefungeError::DivisionByZero { at: Position::new(40, 0), op: '%' };
        let text = render_error(None, &grid, &err, None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Runtime error: division by zero (op=%) at (40, 0)");
        assert_eq!(lines[1].trim().chars().count(), 65);
        assert_eq!(lines[2], format!("  {}^", " ".repeat(32)));
    }

    #[test]
    fn positions_off_the_grid_have_no_context() {
        let grid = Grid::from_source("<");
        let err = BefungeError::OutOfBounds { x: -1, y: 0, at: Position::new(-1, 0) };
        let text = render_error(Some("befunge"), &grid, &err, None);
        assert_eq!(
            text,
            "befunge: Runtime error: cell (-1, 0) is outside the 1x1 grid at (-1, 0)\n"
        );
    }

    #[test]
    fn step_limit_has_no_position() {
        let grid = Grid::from_source(">");
        let err = BefungeError::StepLimitExceeded { limit: 10 };
        let text = render_error(None, &grid, &err, None);
        assert_eq!(text, "Execution aborted: step limit exceeded (10)\n");
    }

    #[test]
    fn input_errors_name_the_reason() {
        let grid = Grid::from_source("&@");
        let err = BefungeError::MalformedInput { at: Position::ORIGIN, reason: InputFault::EndOfInput };
        let text = render_error(None, &grid, &err, None);
        assert!(text.starts_with("Input error: end of input at (0, 0)\n  &@\n  ^\n"));
    }

    #[test]
    fn colors_wrap_the_headline_in_escape_codes() {
        let grid = Grid::from_source(">");
        let err = BefungeError::StepLimitExceeded { limit: 1 };
        let text = render_error(None, &grid, &err, Some(&Colors::default()));
        assert!(text.starts_with("\u{1b}["));
        assert!(text.contains("step limit exceeded (1)"));
    }
}
