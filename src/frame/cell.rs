use crate::frame::label::Label;
use std::fmt::Display;
use thiserror::Error;

/// Errors related to cell content.
#[derive(Error, Debug)]
pub enum CellError {
    #[error("Cell at ({time_step}, {profile}) holds non-numeric value '{value}'")]
    NotNumeric {
        time_step: Label,
        profile: Label,
        value: String,
    },
}

/// Content of a single table cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    /// Numeric value, NaN included
    Number(f64),
    /// Textual value, cannot be scaled
    Text(String),
}

impl CellValue {
    /// Returns the numeric value, or None for text cells.
    pub fn to_double(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(_) => None,
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Number(value) => write!(f, "{}", value),
            CellValue::Text(value) => write!(f, "{}", value),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_owned())
    }
}
