//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`Cell`], [`CellValue`], [`Grid`] - Data structures for cell storage
//! - [`CellRef`], [`Dimensions`] - Cell id parsing (A1 notation ↔ row/col indices)
//! - [`Formula`], [`evaluate_formula`] - The `=<ref>+<ref>` formula shape
//! - [`extract_references`], [`DependencyGraph`] - Formula dependencies and recalc order
//! - [`detect_cycle`] - Circular dependency detection
//! - [`format_number`] - Format values for display

mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod format;
mod formula;
mod grid;

pub use cell::{Cell, CellValue, ERROR_TEXT, is_formula, normalize_input};
pub use cell_ref::{CellRef, CellRefError, Dimensions, MAX_COLS, MAX_ROWS};
pub use cycle::detect_cycle;
pub use deps::{CircularReference, DependencyGraph, RecalcPlan, extract_references};
pub use format::{fit_width, format_number};
pub use formula::{Formula, FormulaError, evaluate_formula};
pub use grid::{Grid, GridError};
