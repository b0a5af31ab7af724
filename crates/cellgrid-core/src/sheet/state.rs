use cellgrid_engine::engine::{Cell, CellRef, CellValue, DependencyGraph, Dimensions, Grid};
use serde::Serialize;

use crate::error::Result;

/// Grid size of a default sheet.
pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 10;

/// One repainted cell returned from [`Sheet::update_cell`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellUpdate {
    pub id: String,
    pub value: CellValue,
}

/// Read-only copy of a cell for front ends.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellView {
    pub raw: String,
    pub value: CellValue,
}

impl From<&Cell> for CellView {
    fn from(cell: &Cell) -> Self {
        CellView {
            raw: cell.raw.clone(),
            value: cell.value.clone(),
        }
    }
}

/// An in-memory spreadsheet: the grid plus its dependency graph.
///
/// All mutation goes through `&mut self`, so there is exactly one writer.
#[derive(Clone, Debug)]
pub struct Sheet {
    pub(crate) grid: Grid,
    pub(crate) graph: DependencyGraph,
}

impl Sheet {
    /// Create a blank sheet with `rows` x `cols` cells (at most 26 columns).
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::with_dimensions(Dimensions::new(rows, cols)?))
    }

    pub fn with_dimensions(dims: Dimensions) -> Self {
        Sheet {
            grid: Grid::new(dims),
            graph: DependencyGraph::new(dims),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// Resolve a cell id against this sheet's bounds.
    pub fn resolve(&self, id: &str) -> Result<CellRef> {
        Ok(self.dimensions().decode(id)?)
    }

    /// Raw input and evaluated value of a cell.
    pub fn get_cell(&self, id: &str) -> Result<CellView> {
        let cell_ref = self.resolve(id)?;
        Ok(CellView::from(self.grid.get(&cell_ref)?))
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellRef, &Cell)> + '_ {
        self.grid.iter()
    }
}

impl Default for Sheet {
    fn default() -> Self {
        let dims = Dimensions::new(DEFAULT_ROWS, DEFAULT_COLS)
            .expect("default dimensions are valid");
        Self::with_dimensions(dims)
    }
}
