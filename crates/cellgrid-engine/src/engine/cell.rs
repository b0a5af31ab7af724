//! Cell data structures for the spreadsheet grid.
//!
//! - [`CellValue`] - The evaluated value shown for a cell
//! - [`Cell`] - Raw user input plus its evaluated value

use serde::Serialize;
use std::fmt;

use super::format::format_number;

/// Display text of a cell whose formula failed.
pub const ERROR_TEXT: &str = "ERROR";

/// The evaluated value of a cell.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Blank,
    Number(f64),
    Text(String),
    Error,
}

// Front ends paint exactly what they receive: numbers stay numbers, everything
// else is its display text.
impl Serialize for CellValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Blank => serializer.serialize_str(""),
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Error => serializer.serialize_str(ERROR_TEXT),
        }
    }
}

impl CellValue {
    /// Numeric contribution of this value as a formula operand.
    /// Anything that is not a number counts as zero.
    pub fn as_operand(&self) -> f64 {
        match self {
            CellValue::Number(n) => *n,
            _ => 0.0,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error)
    }

    /// Value of non-formula input: blank, a number, or the text itself.
    ///
    /// Anything Rust's `f64` parser accepts and is finite is a number, so
    /// `2.5`, `+5` and `1e3` all count. `inf` and `NaN` stay text.
    pub fn from_literal(input: &str) -> CellValue {
        if input.is_empty() {
            return CellValue::Blank;
        }
        match input.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(input.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Blank => Ok(()),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Error => f.write_str(ERROR_TEXT),
        }
    }
}

/// A cell in the spreadsheet grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Cell {
    /// What the user typed; empty means blank.
    pub raw: String,
    pub value: CellValue,
}

impl Cell {
    pub fn new_empty() -> Cell {
        Cell::default()
    }

    pub fn is_blank(&self) -> bool {
        self.raw.is_empty()
    }
}

/// A raw input is a formula when it starts with `=`.
pub fn is_formula(raw: &str) -> bool {
    raw.starts_with('=')
}

/// Normalize user input before storage.
/// - Surrounding whitespace is trimmed
/// - Formulas lose all internal whitespace ("= A1 + B1" -> "=A1+B1")
pub fn normalize_input(input: &str) -> String {
    let trimmed = input.trim();
    if is_formula(trimmed) {
        trimmed.chars().filter(|c| !c.is_whitespace()).collect()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_literal() {
        assert_eq!(CellValue::from_literal(""), CellValue::Blank);
        assert_eq!(CellValue::from_literal("5"), CellValue::Number(5.0));
        assert_eq!(CellValue::from_literal("-12"), CellValue::Number(-12.0));
        assert_eq!(CellValue::from_literal("2.5"), CellValue::Number(2.5));
        assert_eq!(CellValue::from_literal("+5"), CellValue::Number(5.0));
        assert_eq!(CellValue::from_literal("1e3"), CellValue::Number(1000.0));
        assert_eq!(CellValue::from_literal("-1.5E2"), CellValue::Number(-150.0));
        assert_eq!(
            CellValue::from_literal("hello"),
            CellValue::Text("hello".to_string())
        );
        assert_eq!(
            CellValue::from_literal("inf"),
            CellValue::Text("inf".to_string())
        );
        assert_eq!(
            CellValue::from_literal("NaN"),
            CellValue::Text("NaN".to_string())
        );
        assert_eq!(
            CellValue::from_literal("1e400"),
            CellValue::Text("1e400".to_string())
        );
    }

    #[test]
    fn test_operand_value() {
        assert_eq!(CellValue::Number(3.0).as_operand(), 3.0);
        assert_eq!(CellValue::Blank.as_operand(), 0.0);
        assert_eq!(CellValue::Text("x".into()).as_operand(), 0.0);
        assert_eq!(CellValue::Error.as_operand(), 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Blank.to_string(), "");
        assert_eq!(CellValue::Number(7.0).to_string(), "7");
        assert_eq!(CellValue::Error.to_string(), "ERROR");
        assert_eq!(CellValue::Text("abc".into()).to_string(), "abc");
    }

    #[test]
    fn test_normalize_input() {
        assert_eq!(normalize_input("  42 "), "42");
        assert_eq!(normalize_input(" = A1 + B2 "), "=A1+B2");
        assert_eq!(normalize_input("two words"), "two words");
        assert_eq!(normalize_input("   "), "");
    }
}
