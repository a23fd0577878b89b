use chrono::NaiveDateTime;
use std::fmt::Display;
use thiserror::Error;

/// Errors raised while converting labels to integers.
#[derive(Error, Debug)]
pub enum LabelError {
    #[error("Cannot convert {axis} label '{label}' to integer")]
    NotInteger { axis: Axis, label: String },

    #[error("Timestamp {axis} label '{label}' is out of integer range")]
    TimestampOutOfRange { axis: Axis, label: String },
}

/// The two key spaces of a table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Row keys (time steps)
    Index,
    /// Column keys (profile names)
    Columns,
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Index => write!(f, "index"),
            Axis::Columns => write!(f, "columns"),
        }
    }
}

/// A row or column key.
///
/// Labels of different kinds never compare equal: `Int(1)` and `Text("1")`
/// address different rows.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    /// Integer key, the natural time step label
    Int(i64),
    /// Textual key, e.g. a profile name or a time step read from text
    Text(String),
    /// Calendar time step
    Timestamp(NaiveDateTime),
}

impl Label {
    /// Converts the label to an integer label.
    ///
    /// Text is trimmed and parsed as base-10, so "1.0" or "" are rejected.
    /// Timestamps become nanoseconds since the Unix epoch.
    pub fn to_int(&self, axis: Axis) -> Result<Label, LabelError> {
        match self {
            Label::Int(value) => Ok(Label::Int(*value)),
            Label::Text(text) => text
                .trim()
                .parse::<i64>()
                .map(Label::Int)
                .map_err(|_| LabelError::NotInteger {
                    axis,
                    label: text.to_owned(),
                }),
            Label::Timestamp(timestamp) => timestamp
                .and_utc()
                .timestamp_nanos_opt()
                .map(Label::Int)
                .ok_or_else(|| LabelError::TimestampOutOfRange {
                    axis,
                    label: timestamp.to_string(),
                }),
        }
    }

    /// Returns the integer value if this is an integer label.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Label::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Literal form used in descriptions: integers bare, everything else quoted.
    pub(crate) fn repr(&self) -> String {
        match self {
            Label::Int(value) => value.to_string(),
            Label::Text(text) => format!("'{}'", text),
            Label::Timestamp(timestamp) => format!("'{}'", timestamp),
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Int(value) => write!(f, "{}", value),
            Label::Text(text) => write!(f, "{}", text),
            Label::Timestamp(timestamp) => write!(f, "{}", timestamp),
        }
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Text(value.to_owned())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Text(value)
    }
}

impl From<NaiveDateTime> for Label {
    fn from(value: NaiveDateTime) -> Self {
        Label::Timestamp(value)
    }
}

/// Converts a whole axis of labels to integers, failing on the first bad label.
pub(crate) fn to_int_labels(labels: &[Label], axis: Axis) -> Result<Vec<Label>, LabelError> {
    labels.iter().map(|label| label.to_int(axis)).collect()
}
