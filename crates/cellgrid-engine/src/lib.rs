//! cellgrid_engine - Cell ids, grid storage, formulas and dependency tracking.

pub mod engine;
