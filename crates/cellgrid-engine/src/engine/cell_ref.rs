//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell identifiers
//! (e.g., "A1", "J20") and zero-indexed row/column coordinates.
//!
//! Columns are a single uppercase letter, so a grid is at most 26 columns wide.
//!
//! # Examples
//!
//! ```ignore
//! let cell = CellRef::decode("B3").unwrap();
//! assert_eq!(cell.row, 2);  // 0-indexed
//! assert_eq!(cell.col, 1);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Widest grid the single-letter column codec can address.
pub const MAX_COLS: usize = 26;

/// Tallest grid a sheet will allocate.
pub const MAX_ROWS: usize = 65_536;

/// Errors produced while decoding or encoding cell identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellRefError {
    #[error("Malformed cell id: {0:?}")]
    MalformedId(String),

    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid grid dimensions {rows}x{cols} (need 1 <= rows <= 65536 and 1 <= cols <= 26)")]
    InvalidDimensions { rows: usize, cols: usize },
}

/// A reference to a cell by row and column indices (0-indexed).
///
/// Ordering is row-major, which is also the grid's iteration order.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell identifier (e.g. "A1", "J20") without any bounds check.
    pub fn decode(id: &str) -> Result<CellRef, CellRefError> {
        let caps = cell_id_re()
            .captures(id)
            .ok_or_else(|| CellRefError::MalformedId(id.to_string()))?;

        let col = (caps["letter"].as_bytes()[0] - b'A') as usize;
        let row = caps["number"]
            .parse::<usize>()
            .map_err(|_| CellRefError::MalformedId(id.to_string()))?
            - 1;

        Ok(CellRef::new(row, col))
    }

    /// Convert a column index to its letter (0 -> A, 25 -> Z).
    pub fn col_to_letter(col: usize) -> Option<char> {
        if col < MAX_COLS {
            Some((b'A' + col as u8) as char)
        } else {
            None
        }
    }
}

fn cell_id_re() -> &'static Regex {
    static CELL_ID_RE: OnceLock<Regex> = OnceLock::new();
    CELL_ID_RE.get_or_init(|| {
        Regex::new(r"^(?<letter>[A-Z])(?<number>[1-9][0-9]*)$")
            .expect("cell id regex must compile")
    })
}

impl std::str::FromStr for CellRef {
    type Err = CellRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellRef::decode(s)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match CellRef::col_to_letter(self.col) {
            Some(letter) => write!(f, "{}{}", letter, self.row + 1),
            None => write!(f, "?{}", self.row + 1),
        }
    }
}

/// Fixed size of a grid, decided at construction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Dimensions {
    rows: usize,
    cols: usize,
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Result<Dimensions, CellRefError> {
        let in_range = (1..=MAX_ROWS).contains(&rows) && (1..=MAX_COLS).contains(&cols);
        if !in_range || rows.checked_mul(cols).is_none() {
            return Err(CellRefError::InvalidDimensions { rows, cols });
        }
        Ok(Dimensions { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Row-major position of an in-bounds cell.
    pub fn index_of(&self, cell: &CellRef) -> Option<usize> {
        self.contains(cell).then(|| cell.row * self.cols + cell.col)
    }

    /// Inverse of [`Dimensions::index_of`].
    pub fn cell_at(&self, index: usize) -> CellRef {
        CellRef::new(index / self.cols, index % self.cols)
    }

    /// Check that a cell lies inside the grid.
    pub fn check(&self, cell: CellRef) -> Result<CellRef, CellRefError> {
        if self.contains(&cell) {
            Ok(cell)
        } else {
            Err(CellRefError::OutOfRange {
                row: cell.row,
                col: cell.col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Encode zero-based coordinates as an identifier ("A1" for (0, 0)).
    pub fn encode(&self, row: usize, col: usize) -> Result<String, CellRefError> {
        self.check(CellRef::new(row, col)).map(|cell| cell.to_string())
    }

    /// Decode an identifier and require it to be inside the grid.
    pub fn decode(&self, id: &str) -> Result<CellRef, CellRefError> {
        self.check(CellRef::decode(id)?)
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = CellRef> + '_ {
        let dims = *self;
        (0..self.len()).map(move |index| dims.cell_at(index))
    }
}
