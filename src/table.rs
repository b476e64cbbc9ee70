//! Text arrangement tables
//!
//! Tiles a string into every rows × columns grid whose cell count equals the
//! string length and renders each grid with ASCII borders.

use crate::error::{Error, Result};
use std::fmt;
use std::io::{self, Write};

/// Width of the rule printed after each text
pub const SEPARATOR_WIDTH: usize = 40;

/// A rows × columns factorization of a text length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Row-major character matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<char>,
}

impl Grid {
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.dims.rows || col >= self.dims.cols {
            return None;
        }
        self.cells.get(row * self.dims.cols + col).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[char]> {
        if row >= self.dims.rows {
            return None;
        }
        let start = row * self.dims.cols;
        self.cells.get(start..start + self.dims.cols)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[char]> {
        // chunks() panics on 0, and a zero-column grid has no visible rows anyway
        self.cells.chunks(self.dims.cols.max(1))
    }

    /// All cells in row-major order, padding included
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Concatenated cells with the trailing padding removed
    pub fn to_text(&self) -> String {
        let text: String = self.cells.iter().collect();
        text.trim_end_matches(' ').to_string()
    }

    pub fn to_rows(&self) -> Vec<Vec<char>> {
        self.iter_rows().map(<[char]>::to_vec).collect()
    }
}

/// Remove every space character from `text`
pub fn strip_spaces(text: &str) -> String {
    text.replace(' ', "")
}

/// Every (rows, cols) pair with rows * cols == length, ascending by rows.
///
/// A zero length has no factorization and yields nothing.
pub fn list_dimensions(length: usize) -> Vec<Dimensions> {
    (1..=length)
        .filter(|rows| length % rows == 0)
        .map(|rows| Dimensions::new(rows, length / rows))
        .collect()
}

/// Lay `text` out row-major in a rows × cols grid, padding with spaces.
///
/// Characters beyond rows * cols are dropped.
pub fn build_grid(text: &str, rows: usize, cols: usize) -> Grid {
    let size = rows * cols;
    let mut cells: Vec<char> = text.chars().take(size).collect();
    cells.resize(size, ' ');

    Grid {
        dims: Dimensions::new(rows, cols),
        cells,
    }
}

/// Render a grid with `+---+` borders, ending with a blank line
pub fn render(grid: &Grid) -> String {
    let border = format!("+{}", "---+".repeat(grid.cols()));
    let mut out = String::new();

    out.push_str(&border);
    out.push('\n');

    for row in grid.iter_rows().take(grid.rows()) {
        let cells: Vec<String> = row.iter().map(char::to_string).collect();
        out.push_str("| ");
        out.push_str(&cells.join(" | "));
        out.push_str(" |\n");
        out.push_str(&border);
        out.push('\n');
    }

    out.push('\n');
    out
}

/// All grids for one input text
#[derive(Debug, Clone)]
pub struct Arrangement {
    /// Input with spaces removed
    pub text: String,
    pub tables: Vec<(Dimensions, Grid)>,
}

impl Arrangement {
    /// Length of the stripped text in characters
    pub fn length(&self) -> usize {
        self.text.chars().count()
    }
}

/// Strip spaces from `text` and build a grid for every factorization
pub fn arrange_all(text: &str) -> Arrangement {
    let text = strip_spaces(text);
    let length = text.chars().count();

    let tables = list_dimensions(length)
        .into_iter()
        .map(|dims| (dims, build_grid(&text, dims.rows, dims.cols)))
        .collect();

    Arrangement { text, tables }
}

/// Write the summary and every rendered table for `text`
pub fn write_all_tables<W: Write>(out: &mut W, text: &str) -> io::Result<Arrangement> {
    let arrangement = arrange_all(text);

    writeln!(out, "Text: {}", arrangement.text)?;
    writeln!(out, "Length: {}", arrangement.length())?;
    writeln!(out, "Possible arrangements:")?;
    writeln!(out)?;

    for (dims, grid) in &arrangement.tables {
        writeln!(out, "{} Table:", dims)?;
        out.write_all(render(grid).as_bytes())?;
    }

    log::debug!(
        "Rendered {} tables for {:?}",
        arrangement.tables.len(),
        arrangement.text
    );

    Ok(arrangement)
}

/// Rule line printed after each text
pub fn write_separator<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH))?;
    writeln!(out)
}

/// Print the tables for every text, each followed by the rule line.
///
/// Fails with [`Error::NoText`] before writing anything when `texts` is empty.
pub fn print_all<W, S>(out: &mut W, texts: &[S]) -> Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    if texts.is_empty() {
        return Err(Error::NoText);
    }

    for text in texts {
        write_all_tables(out, text.as_ref())?;
        write_separator(out)?;
    }

    out.flush()?;
    Ok(())
}
