//! Error types for cellgrid core.

use thiserror::Error;

use cellgrid_engine::engine::{CellRefError, GridError};

/// Contract violations by the caller of a [`crate::Sheet`].
///
/// Mistakes inside user formulas are not errors; they show up as the
/// `ERROR` cell value instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    #[error(transparent)]
    CellRef(#[from] CellRefError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type Result<T> = std::result::Result<T, SheetError>;
