//! # Data Source Module
//!
//! The read interface a time series simulation pulls its inputs through, and
//! the table-backed implementation of it.
use crate::error::FrameDataError;
use crate::frame::label::Label;
use std::fmt::Display;

pub mod frame_data;
pub mod options;

/// Value of one profile at one time step.
#[derive(Clone, Debug, PartialEq)]
pub enum ProfileValue {
    /// A single cell
    Scalar(f64),
    /// Several cells, when the profile or time step label is repeated
    Sequence(Vec<f64>),
}

impl ProfileValue {
    /// Returns the value if it is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            ProfileValue::Scalar(value) => Some(*value),
            ProfileValue::Sequence(_) => None,
        }
    }

    /// All values in order; a scalar is a one-element slice.
    pub fn values(&self) -> &[f64] {
        match self {
            ProfileValue::Scalar(value) => std::slice::from_ref(value),
            ProfileValue::Sequence(values) => values,
        }
    }

    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// Multiplies every value by the factor.
    pub fn scaled(self, factor: f64) -> Self {
        match self {
            ProfileValue::Scalar(value) => ProfileValue::Scalar(value * factor),
            ProfileValue::Sequence(values) => {
                ProfileValue::Sequence(values.into_iter().map(|value| value * factor).collect())
            }
        }
    }
}

impl Display for ProfileValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileValue::Scalar(value) => write!(f, "{}", value),
            ProfileValue::Sequence(values) => {
                let values: Vec<String> = values.iter().map(|value| value.to_string()).collect();
                write!(f, "[{}]", values.join(", "))
            }
        }
    }
}

/// Source of time series input values for a simulation.
///
/// Time steps are expected to be consecutive and start at 0; implementations
/// do not check this.
pub trait DataSource {
    /// Returns the value of a profile at a time step, multiplied by `scale_factor`.
    ///
    /// # Errors
    ///
    /// Fails with a lookup error if the time step or profile is unknown, and
    /// with a type error if a matched cell is not numeric.
    fn scaled_time_step_value(
        &self,
        time_step: &Label,
        profile_name: &Label,
        scale_factor: f64,
    ) -> Result<ProfileValue, FrameDataError>;

    /// Returns the unscaled value of a profile at a time step.
    fn time_step_value(&self, time_step: &Label, profile_name: &Label) -> Result<ProfileValue, FrameDataError> {
        self.scaled_time_step_value(time_step, profile_name, 1.0)
    }

    /// Returns the number of time steps currently available.
    fn time_steps_len(&self) -> Result<usize, FrameDataError>;
}
