//! Plain-text rendering of the whole grid.
//!
//! The first line holds the column letters, every following line starts with
//! its 1-based row number.

use cellgrid_core::{CellRef, Sheet};
use cellgrid_engine::engine::fit_width;

pub fn render_grid(sheet: &Sheet, column_width: usize) -> String {
    let dims = sheet.dimensions();
    let label_width = dims.rows().to_string().len();
    let mut out = String::new();

    out.push_str(&" ".repeat(label_width));
    for col in 0..dims.cols() {
        let letter = CellRef::col_to_letter(col).unwrap_or('?');
        out.push(' ');
        out.push_str(&fit_width(&letter.to_string(), column_width));
    }
    out.push('\n');

    let mut current_row = None;
    for (cell_ref, cell) in sheet.cells() {
        if current_row != Some(cell_ref.row) {
            if current_row.is_some() {
                out.push('\n');
            }
            current_row = Some(cell_ref.row);
            out.push_str(&format!(
                "{:>width$}",
                cell_ref.row + 1,
                width = label_width
            ));
        }
        out.push(' ');
        out.push_str(&fit_width(&cell.value.to_string(), column_width));
    }
    out.push('\n');

    out.lines().map(str::trim_end).collect::<Vec<_>>().join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_small_grid() {
        let mut sheet = Sheet::new(2, 3).unwrap();
        sheet.update_cell("A1", "3").unwrap();
        sheet.update_cell("B1", "4").unwrap();
        sheet.update_cell("C2", "=A1+B1").unwrap();
        sheet.update_cell("A2", "abcdefgh").unwrap();

        let expected = "  A    B    C\n1 3    4\n2 abc…      7\n";
        assert_eq!(render_grid(&sheet, 4), expected);
    }
}
