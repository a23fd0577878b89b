use crate::error::FrameDataError;
use thiserror::Error;

/// Errors related to data source configuration.
#[derive(Error, Debug)]
pub enum OptionError {
    #[error("Invalid label mode '{0}'")]
    InvalidLabelMode(String),
}

/// How a data source treats the labels of the table it wraps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LabelMode {
    /// Keep labels as the table was built
    #[default]
    Keep,
    /// Coerce row and column labels to integers at construction
    Integer,
}

impl LabelMode {
    /// Returns the canonical name of the mode.
    pub const fn as_str(&self) -> &'static str {
        match self {
            LabelMode::Keep => "keep",
            LabelMode::Integer => "integer",
        }
    }

    /// Parses a label mode from its name.
    /// Supports various aliases for each mode.
    pub fn parse(name: &str) -> Result<Self, FrameDataError> {
        match name.to_ascii_uppercase().as_str() {
            "KEEP" | "AS_IS" | "LABEL" => Ok(Self::Keep),
            "INT" | "INTEGER" | "MULTI" => Ok(Self::Integer),
            _ => Err(OptionError::InvalidLabelMode(name.to_string()))?,
        }
    }
}

impl From<bool> for LabelMode {
    /// Maps the plain coercion flag onto a mode.
    fn from(integer_labels: bool) -> Self {
        if integer_labels {
            LabelMode::Integer
        } else {
            LabelMode::Keep
        }
    }
}

/// Construction options for [`FrameData`](crate::source::frame_data::FrameData).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameDataOptions {
    pub label_mode: LabelMode,
}

impl FrameDataOptions {
    /// Options with the given label mode.
    pub fn with_label_mode(label_mode: LabelMode) -> Self {
        Self { label_mode }
    }
}
