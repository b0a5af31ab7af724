//! cellgrid-core - UI-agnostic sheet model and recalculation.

pub mod error;
pub mod sheet;

pub use error::{Result, SheetError};
pub use sheet::{CellUpdate, CellView, Sheet};

pub use cellgrid_engine::engine::{CellRef, CellValue, Dimensions};
