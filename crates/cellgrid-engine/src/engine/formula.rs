//! Parsing and evaluation of the single supported formula shape, `=<ref>+<ref>`.
//!
//! Operands contribute their referenced cell's evaluated value when it is a
//! number and zero otherwise (blank, text and error cells all count as 0).
//! Failures are reported as [`FormulaError`]; callers turn them into the
//! `ERROR` cell value rather than propagating them.

use thiserror::Error;

use super::cell::is_formula;
use super::cell_ref::CellRef;
use super::grid::Grid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    #[error("Not a formula")]
    NotAFormula,

    #[error("Expected 2 operands, found {0}")]
    OperandCount(usize),

    #[error("Invalid operand {0:?}")]
    BadOperand(String),

    #[error("Formula references its own cell {0}")]
    SelfReference(CellRef),

    #[error("Operand {0} is outside the grid")]
    UnknownCell(CellRef),
}

/// A parsed `=<left>+<right>` formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Formula {
    pub left: CellRef,
    pub right: CellRef,
}

impl Formula {
    /// Parse normalized formula text. No bounds checks happen here.
    pub fn parse(raw: &str) -> Result<Formula, FormulaError> {
        let body = raw.strip_prefix('=').ok_or(FormulaError::NotAFormula)?;
        let tokens: Vec<&str> = body.split('+').collect();
        if tokens.len() != 2 {
            return Err(FormulaError::OperandCount(tokens.len()));
        }
        let operand = |token: &str| {
            CellRef::decode(token).map_err(|_| FormulaError::BadOperand(token.to_string()))
        };
        Ok(Formula {
            left: operand(tokens[0])?,
            right: operand(tokens[1])?,
        })
    }

    pub fn operands(&self) -> [CellRef; 2] {
        [self.left, self.right]
    }

    /// Sum the two operands against the current grid state.
    pub fn evaluate(&self, target: &CellRef, grid: &Grid) -> Result<f64, FormulaError> {
        if self.left == *target || self.right == *target {
            return Err(FormulaError::SelfReference(*target));
        }
        let mut sum = 0.0;
        for operand in self.operands() {
            let cell = grid
                .get(&operand)
                .map_err(|_| FormulaError::UnknownCell(operand))?;
            sum += cell.value.as_operand();
        }
        Ok(sum)
    }
}

/// Parse and evaluate formula text for the cell at `target`.
pub fn evaluate_formula(raw: &str, target: &CellRef, grid: &Grid) -> Result<f64, FormulaError> {
    if !is_formula(raw) {
        return Err(FormulaError::NotAFormula);
    }
    Formula::parse(raw)?.evaluate(target, grid)
}
