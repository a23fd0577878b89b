//! # Frame Data Source
//!
//! A read-only adapter that serves time series inputs to a simulation from a
//! labeled two-dimensional table: rows are time steps, columns are profiles.
//!
//! ## Features
//!
//! - **Live reads**: the table stays with its owner; every call reads its current state
//! - **Duplicate labels**: repeated profile labels yield a sequence of values in column order
//! - **Scaling**: values are multiplied by a scale factor on the way out
//! - **Integer labels**: optional one-time coercion of row and column labels to integers
//! - **Typed errors**: lookup failures and type failures are told apart
//!
//! ## Usage
//!
//! ```
//! use frame_data::{CellValue, DataSource, Frame, FrameData, Label, ProfileValue};
//!
//! let frame = Frame::from_rows(
//!     vec![Label::from(0), Label::from(1)],
//!     vec![Label::from("load")],
//!     vec![vec![CellValue::from(1.5)], vec![CellValue::from(2.0)]],
//! )?
//! .into_shared();
//! let source = FrameData::new(&frame);
//!
//! assert_eq!(source.time_steps_len()?, 2);
//! let value = source.scaled_time_step_value(&Label::from(1), &Label::from("load"), 3.0)?;
//! assert_eq!(value, ProfileValue::Scalar(6.0));
//! # Ok::<(), frame_data::FrameDataError>(())
//! ```
//!
//! Time steps are expected to be consecutive integers starting at 0. This is
//! the caller's responsibility and is not checked.
pub mod error;
pub mod frame;
pub mod source;

pub use crate::error::FrameDataError;
pub use crate::frame::cell::CellValue;
pub use crate::frame::label::Label;
pub use crate::frame::{Frame, FrameError, SharedFrame};
pub use crate::source::frame_data::FrameData;
pub use crate::source::options::{FrameDataOptions, LabelMode};
pub use crate::source::{DataSource, ProfileValue};
