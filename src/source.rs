//! Cell-level access to one sheet of tabular data.

use crate::columns::POSITIONAL_PREFIX;

/// One spreadsheet cell: zero-based column index and its formatted text.
pub type Cell = (usize, String);

/// A single row as the ordered cells that are physically present.
pub type Row = Vec<Cell>;

/// Read access to one sheet of tabular data.
///
/// Implementations own the format decoding; the extraction engine only ever
/// sees ordered `(column, text)` pairs. A source is opened for the duration
/// of one pass and holds no aggregation state of its own.
pub trait CellSource {
    /// Column names, positionally indexed. When `uses_header` is false the
    /// names are synthesised as `col0`, `col1`, ... from the first row's
    /// width.
    fn header_row(&self, uses_header: bool) -> Vec<String>;

    /// Every row in file order, including the header row when one is
    /// present.
    fn rows(&self) -> Box<dyn Iterator<Item = Row> + '_>;
}

/// In-memory [`CellSource`] backed by a grid of strings.
///
/// Useful for callers embedding the engine over tabular decoders other than
/// the bundled Excel adapter, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    grid: Vec<Vec<String>>,
}

impl MemorySource {
    /// Wraps a grid of rows; every inner vector is one row's cells starting
    /// at column zero.
    pub fn new(grid: Vec<Vec<String>>) -> Self {
        Self { grid }
    }
}

impl CellSource for MemorySource {
    fn header_row(&self, uses_header: bool) -> Vec<String> {
        match self.grid.first() {
            Some(first) if uses_header => first.clone(),
            Some(first) => (0..first.len())
                .map(|index| format!("{POSITIONAL_PREFIX}{index}"))
                .collect(),
            None => Vec::new(),
        }
    }

    fn rows(&self) -> Box<dyn Iterator<Item = Row> + '_> {
        Box::new(
            self.grid
                .iter()
                .map(|row| row.iter().cloned().enumerate().collect()),
        )
    }
}
