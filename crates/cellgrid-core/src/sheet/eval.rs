use cellgrid_engine::engine::{CellRef, CellValue, evaluate_formula, is_formula};
use log::debug;

use super::Sheet;
use crate::error::Result;

impl Sheet {
    /// Compute the value a cell's current raw input should display.
    ///
    /// Formula failures become [`CellValue::Error`]; only an out-of-bounds
    /// `cell_ref` is an `Err`.
    pub(crate) fn evaluate_cell(&self, cell_ref: &CellRef) -> Result<CellValue> {
        let raw = &self.grid.get(cell_ref)?.raw;
        if !is_formula(raw) {
            return Ok(CellValue::from_literal(raw));
        }
        match evaluate_formula(raw, cell_ref, &self.grid) {
            Ok(n) => Ok(CellValue::Number(n)),
            Err(e) => {
                debug!("{} = {:?}: {}", cell_ref, raw, e);
                Ok(CellValue::Error)
            }
        }
    }

    /// Evaluate a cell and store the result.
    pub(crate) fn recompute(&mut self, cell_ref: &CellRef) -> Result<CellValue> {
        let value = self.evaluate_cell(cell_ref)?;
        self.grid.set_value(cell_ref, value.clone())?;
        Ok(value)
    }
}
