//! Dense, fixed-size cell storage.
//!
//! Every in-bounds position always holds exactly one [`Cell`]; there are no
//! missing entries. Cells are stored row-major, so iteration order is row 0
//! left to right, then row 1, and so on.

use thiserror::Error;

use super::cell::{Cell, CellValue};
use super::cell_ref::{CellRef, Dimensions};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Unknown cell {0}")]
    UnknownCell(CellRef),
}

/// Fixed-size grid of cells.
#[derive(Clone, Debug)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(dims: Dimensions) -> Grid {
        Grid {
            dims,
            cells: vec![Cell::new_empty(); dims.len()],
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    fn index(&self, cell: &CellRef) -> Result<usize, GridError> {
        self.dims
            .index_of(cell)
            .ok_or(GridError::UnknownCell(*cell))
    }

    pub fn get(&self, cell: &CellRef) -> Result<&Cell, GridError> {
        let index = self.index(cell)?;
        Ok(&self.cells[index])
    }

    /// Replace a cell's raw input. The evaluated value is left untouched.
    pub fn set_raw(&mut self, cell: &CellRef, raw: impl Into<String>) -> Result<(), GridError> {
        let index = self.index(cell)?;
        self.cells[index].raw = raw.into();
        Ok(())
    }

    /// Replace a cell's evaluated value.
    pub fn set_value(&mut self, cell: &CellRef, value: CellValue) -> Result<(), GridError> {
        let index = self.index(cell)?;
        self.cells[index].value = value;
        Ok(())
    }

    /// Reset every cell to blank.
    pub fn clear_all(&mut self) {
        self.cells.fill(Cell::new_empty());
    }

    /// Visit every cell in row-major order.
    pub fn for_each_cell<F: FnMut(CellRef, &Cell)>(&self, mut f: F) {
        for (cell_ref, cell) in self.iter() {
            f(cell_ref, cell);
        }
    }

    /// Iterate `(position, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellRef, &Cell)> + '_ {
        let dims = self.dims;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (dims.cell_at(index), cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(Dimensions::new(3, 2).unwrap())
    }

    #[test]
    fn test_new_grid_is_blank() {
        let grid = grid();
        let mut count = 0;
        grid.for_each_cell(|_, cell| {
            assert!(cell.is_blank());
            assert_eq!(cell.value, CellValue::Blank);
            count += 1;
        });
        assert_eq!(count, 6);
    }

    #[test]
    fn test_set_raw_does_not_touch_value() {
        let mut grid = grid();
        let b2 = CellRef::new(1, 1);
        grid.set_value(&b2, CellValue::Number(1.0)).unwrap();
        grid.set_raw(&b2, "=A1+A2").unwrap();
        let cell = grid.get(&b2).unwrap();
        assert_eq!(cell.raw, "=A1+A2");
        assert_eq!(cell.value, CellValue::Number(1.0));
    }

    #[test]
    fn test_out_of_bounds_is_unknown_cell() {
        let mut grid = grid();
        let outside = CellRef::new(3, 0);
        assert_eq!(grid.get(&outside), Err(GridError::UnknownCell(outside)));
        assert!(grid.set_raw(&CellRef::new(0, 2), "x").is_err());
        assert!(grid.set_value(&outside, CellValue::Blank).is_err());
    }

    #[test]
    fn test_clear_all() {
        let mut grid = grid();
        let a1 = CellRef::new(0, 0);
        grid.set_raw(&a1, "5").unwrap();
        grid.set_value(&a1, CellValue::Number(5.0)).unwrap();
        grid.clear_all();
        assert_eq!(grid.get(&a1).unwrap(), &Cell::new_empty());
    }

    #[test]
    fn test_iteration_order() {
        let grid = grid();
        let order: Vec<String> = grid.iter().map(|(r, _)| r.to_string()).collect();
        assert_eq!(order, ["A1", "B1", "A2", "B2", "A3", "B3"]);
    }
}
