//! Sheet state and recalculation (UI-agnostic).

mod eval;
mod ops;
mod state;

pub use state::{CellUpdate, CellView, DEFAULT_COLS, DEFAULT_ROWS, Sheet};
