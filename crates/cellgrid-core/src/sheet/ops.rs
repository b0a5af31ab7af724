use cellgrid_engine::engine::{
    CellRef, CellValue, detect_cycle, extract_references, is_formula, normalize_input,
};
use log::{debug, warn};

use super::{CellUpdate, Sheet};
use crate::error::Result;

impl Sheet {
    /// Set a cell's raw input and recalculate everything that depends on it.
    ///
    /// Returns the edited cell, then any dependents on a cycle (marked
    /// `ERROR`), then each recalculated dependent in evaluation order, with
    /// the value now stored for it. When the edited cell's own formula fails
    /// (bad shape, self reference, out-of-bounds operand, or a cycle through
    /// the cell) only the edited cell is returned, marked `ERROR`, and its
    /// dependents keep their previous values.
    ///
    /// A malformed or out-of-bounds `id` is an `Err` and nothing changes.
    pub fn update_cell(&mut self, id: &str, raw: &str) -> Result<Vec<CellUpdate>> {
        let cell_ref = self.resolve(id)?;
        let raw = normalize_input(raw);

        self.grid.set_raw(&cell_ref, raw.as_str())?;
        self.graph
            .set_precedents(&cell_ref, &extract_references(&raw));

        let mut value = self.evaluate_cell(&cell_ref)?;
        if is_formula(&raw)
            && !value.is_error()
            && let Some(path) = detect_cycle(&cell_ref, &self.graph)
        {
            warn!("{} closes a circular reference: {}", cell_ref, format_path(&path));
            value = CellValue::Error;
        }
        self.grid.set_value(&cell_ref, value.clone())?;

        let mut updates = vec![CellUpdate {
            id: cell_ref.to_string(),
            value: value.clone(),
        }];
        if is_formula(&raw) && value.is_error() {
            return Ok(updates);
        }

        let plan = self.graph.recalc_plan(&cell_ref);
        if !plan.is_acyclic() {
            warn!(
                "circular reference downstream of {}: {}",
                cell_ref,
                plan.cyclic
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        // Cycle members are committed first so their readers see ERROR as 0.
        for dependent in &plan.cyclic {
            self.grid.set_value(dependent, CellValue::Error)?;
            updates.push(CellUpdate {
                id: dependent.to_string(),
                value: CellValue::Error,
            });
        }
        for dependent in &plan.order {
            let value = self.recompute(dependent)?;
            debug!("recalculated {} = {}", dependent, value);
            updates.push(CellUpdate {
                id: dependent.to_string(),
                value,
            });
        }

        Ok(updates)
    }

    /// Reset every cell to blank and forget all dependencies.
    pub fn clear_all(&mut self) {
        self.grid.clear_all();
        self.graph.clear();
        debug!("cleared all cells");
    }
}

fn format_path(path: &[CellRef]) -> String {
    path.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
