//! The playfield: a fixed-size 2D array of cell values built from source text.

use std::fmt;

use crate::Value;

/// Cell value used for padding beyond the end of short lines.
pub const BLANK: Value = b' ' as Value;

/// A coordinate pair fell outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cell ({x}, {y}) is outside the grid")]
pub struct OutOfBounds {
    pub x: Value,
    pub y: Value,
}

/// The program grid.
///
/// Width is the length of the longest source line, trailing whitespace
/// included, and height is the number of `\n`-separated lines. Cell contents
/// are right-trimmed, so trailing whitespace becomes blank cells. The grid
/// never grows; every access is bounds-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    // Row-major: cells[y * width + x]
    cells: Vec<Value>,
}

impl Grid {
    /// Build a grid from raw source text.
    pub fn from_source(source: &str) -> Self {
        let raw: Vec<&str> = source.split('\n').collect();

        // Trailing blanks still count towards the width; `p` may store there.
        let width = raw.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let height = raw.len();
        let lines: Vec<Vec<char>> = raw
            .iter()
            .map(|line| line.trim_end().chars().collect())
            .collect();
        let mut cells = vec![BLANK; width * height];

        for (y, line) in lines.iter().enumerate() {
            for (x, &ch) in line.iter().enumerate() {
                cells[y * width + x] = ch as Value;
            }
        }

        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` addresses a cell of this grid.
    pub fn contains(&self, x: Value, y: Value) -> bool {
        self.index(x, y).is_some()
    }

    /// Read the cell at `(x, y)`.
    pub fn get(&self, x: Value, y: Value) -> Result<Value, OutOfBounds> {
        self.index(x, y)
            .map(|i| self.cells[i])
            .ok_or(OutOfBounds { x, y })
    }

    /// Overwrite the cell at `(x, y)`.
    pub fn set(&mut self, x: Value, y: Value, value: Value) -> Result<(), OutOfBounds> {
        let i = self.index(x, y).ok_or(OutOfBounds { x, y })?;
        self.cells[i] = value;
        Ok(())
    }

    /// Render row `y` back to text, trailing blanks trimmed.
    ///
    /// Cells that are not valid Unicode scalar values render as U+FFFD.
    pub fn row_text(&self, y: usize) -> Option<String> {
        if y >= self.height {
            return None;
        }
        let row = &self.cells[y * self.width..(y + 1) * self.width];
        let text: String = row.iter().map(|&v| cell_char(v)).collect();
        Some(text.trim_end().to_string())
    }

    fn index(&self, x: Value, y: Value) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", self.row_text(y).unwrap_or_default())?;
        }
        Ok(())
    }
}

/// Interpret a cell value as a character, falling back to U+FFFD.
pub fn cell_char(value: Value) -> char {
    u32::try_from(value)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_follow_longest_line_and_line_count() {
        let grid = Grid::from_source("v  \n>12@\n^");
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
    }

    #[test]
    fn short_lines_are_padded_with_blanks() {
        let grid = Grid::from_source("ab\nc");
        assert_eq!(grid.get(0, 1), Ok('c' as Value));
        assert_eq!(grid.get(1, 1), Ok(BLANK));
    }

    #[test]
    fn trailing_whitespace_is_trimmed_but_still_counts_for_width() {
        let grid = Grid::from_source("12   \r\n3\r\n");
        assert_eq!(grid.width(), 6);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.row_text(0).as_deref(), Some("12"));
        assert_eq!(grid.get(5, 0), Ok(BLANK));
        assert_eq!(grid.get(1, 1), Ok(BLANK));
    }

    #[test]
    fn width_of_a_line_with_only_trailing_blanks() {
        assert_eq!(Grid::from_source("@    ").width(), 5);
    }

    #[test]
    fn get_outside_grid_reports_coordinates() {
        let grid = Grid::from_source("@");
        assert_eq!(grid.get(1, 0), Err(OutOfBounds { x: 1, y: 0 }));
        assert_eq!(grid.get(0, -1), Err(OutOfBounds { x: 0, y: -1 }));
        assert!(!grid.contains(-1, 0));
        assert!(grid.contains(0, 0));
    }

    #[test]
    fn set_overwrites_and_checks_bounds() {
        let mut grid = Grid::from_source("  \n  ");
        grid.set(1, 1, 'A' as Value).unwrap();
        assert_eq!(grid.get(1, 1), Ok(65));
        assert_eq!(grid.set(2, 0, 1), Err(OutOfBounds { x: 2, y: 0 }));
    }

    #[test]
    fn display_renders_rows() {
        let grid = Grid::from_source("v <\n>  ^");
        assert_eq!(grid.to_string(), "v <\n>  ^");
    }

    #[test]
    fn non_scalar_cells_render_as_replacement() {
        let mut grid = Grid::from_source("a");
        grid.set(0, 0, -5).unwrap();
        assert_eq!(grid.row_text(0).as_deref(), Some("\u{FFFD}"));
    }
}
