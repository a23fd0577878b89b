use thiserror::Error;

/// Main error type for the frame data source.
/// Aggregates errors from the table, label, cell and option modules.
#[derive(Error, Debug)]
pub enum FrameDataError {
    // Table module errors
    #[error("{0}")]
    FrameError(#[from] crate::frame::FrameError),

    #[error("{0}")]
    LabelError(#[from] crate::frame::label::LabelError),

    #[error("{0}")]
    CellError(#[from] crate::frame::cell::CellError),

    // Source module errors
    #[error("{0}")]
    OptionError(#[from] crate::source::options::OptionError),
}

impl FrameDataError {
    /// Returns true if the error comes from a key lookup against the table
    /// (unknown time step or profile, detached or busy table).
    pub fn is_lookup(&self) -> bool {
        match self {
            FrameDataError::FrameError(error) => error.is_lookup(),
            _ => false,
        }
    }

    /// Returns true if the error is a type or conversion failure.
    pub fn is_type(&self) -> bool {
        matches!(self, FrameDataError::LabelError(_) | FrameDataError::CellError(_))
    }
}
