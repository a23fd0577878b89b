//! # Labeled Table Module
//!
//! The two-dimensional table read by the data source: rows keyed by time step
//! labels, columns keyed by profile labels, cells holding numeric values.
//! Labels may repeat on either axis, so lookups return every matching position.
use crate::error::FrameDataError;
use crate::frame::cell::CellValue;
use crate::frame::label::{to_int_labels, Axis, Label};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

pub mod cell;
pub mod label;

/// Shared handle to a table. The owner keeps it; data sources only hold a
/// weak reference to it.
pub type SharedFrame = Rc<RefCell<Frame>>;

/// Errors related to table shape and key lookup.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Time step '{0}' not found in index")]
    RowNotFound(Label),

    #[error("Profile '{0}' not found in columns")]
    ColumnNotFound(Label),

    #[error("Table has been dropped by its owner")]
    Detached,

    #[error("Table is mutably borrowed elsewhere")]
    Busy,

    #[error("Row '{label}' has {actual} values, expected {expected}")]
    RowWidth {
        label: Label,
        expected: usize,
        actual: usize,
    },

    #[error("Index has {index} labels but table has {rows} rows")]
    IndexLength { index: usize, rows: usize },
}

impl FrameError {
    /// Returns true for errors raised while addressing the table by key.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            FrameError::RowNotFound(_)
                | FrameError::ColumnNotFound(_)
                | FrameError::Detached
                | FrameError::Busy
        )
    }
}

/// A labeled two-dimensional table stored row by row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Row labels, one per row
    index: Vec<Label>,
    /// Column labels, one per column
    columns: Vec<Label>,
    /// Cell values, `rows[row][col]`
    rows: Vec<Vec<CellValue>>,
}

impl Frame {
    /// Creates an empty table with the given column labels.
    pub fn new(columns: Vec<Label>) -> Self {
        Self {
            index: Vec::new(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table in one step, checking that every row matches the column count.
    pub fn from_rows(
        index: Vec<Label>,
        columns: Vec<Label>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, FrameError> {
        if index.len() != rows.len() {
            return Err(FrameError::IndexLength {
                index: index.len(),
                rows: rows.len(),
            });
        }
        let mut frame = Self::new(columns);
        for (label, values) in index.into_iter().zip(rows) {
            frame.push_row(label, values)?;
        }
        Ok(frame)
    }

    /// Wraps the table into a shared handle.
    pub fn into_shared(self) -> SharedFrame {
        Rc::new(RefCell::new(self))
    }

    /// Returns the number of rows (time steps).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of columns (profiles).
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Row labels in table order.
    pub fn index(&self) -> &[Label] {
        &self.index
    }

    /// Column labels in table order.
    pub fn columns(&self) -> &[Label] {
        &self.columns
    }

    /// Appends a row.
    pub fn push_row(&mut self, label: Label, values: Vec<CellValue>) -> Result<(), FrameError> {
        if values.len() != self.columns.len() {
            return Err(FrameError::RowWidth {
                label,
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        self.index.push(label);
        self.rows.push(values);
        Ok(())
    }

    /// Removes the first row with the given label and returns its values.
    pub fn remove_row(&mut self, label: &Label) -> Option<Vec<CellValue>> {
        let position = self.index.iter().position(|it| it == label)?;
        self.index.remove(position);
        Some(self.rows.remove(position))
    }

    /// Overwrites every cell addressed by (row, column).
    pub fn set(&mut self, row: &Label, column: &Label, value: CellValue) -> Result<(), FrameError> {
        let rows = self.row_positions(row)?;
        let cols = self.column_positions(column)?;
        for row in &rows {
            for col in &cols {
                self.rows[*row][*col] = value.clone();
            }
        }
        Ok(())
    }

    /// Returns the cell at a position, or None when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row)?.get(col)
    }

    /// Cells at every (row, col) pair, rows first, then columns.
    pub(crate) fn cells_at<'a>(
        &'a self,
        rows: &'a [usize],
        cols: &'a [usize],
    ) -> impl Iterator<Item = &'a CellValue> + 'a {
        rows.iter()
            .flat_map(move |row| cols.iter().map(move |col| &self.rows[*row][*col]))
    }

    /// Positions of every row carrying the label, in table order.
    pub fn row_positions(&self, label: &Label) -> Result<Vec<usize>, FrameError> {
        positions(&self.index, label).ok_or_else(|| FrameError::RowNotFound(label.clone()))
    }

    /// Positions of every column carrying the label, in table order.
    pub fn column_positions(&self, label: &Label) -> Result<Vec<usize>, FrameError> {
        positions(&self.columns, label).ok_or_else(|| FrameError::ColumnNotFound(label.clone()))
    }

    /// Rewrites both row and column labels as integer labels.
    ///
    /// Both axes are converted before either is replaced, so on error the
    /// table is left as it was.
    pub fn coerce_labels_to_int(&mut self) -> Result<(), FrameDataError> {
        let index = to_int_labels(&self.index, Axis::Index)?;
        let columns = to_int_labels(&self.columns, Axis::Columns)?;
        log::debug!(
            "Coerced {} index labels and {} column labels to integers",
            index.len(),
            columns.len()
        );
        self.index = index;
        self.columns = columns;
        Ok(())
    }
}

/// Returns all positions of `label` in `labels`, or None if there is none.
fn positions(labels: &[Label], label: &Label) -> Option<Vec<usize>> {
    let found: Vec<usize> = labels
        .iter()
        .enumerate()
        .filter(|(_, it)| *it == label)
        .map(|(index, _)| index)
        .collect();
    if found.is_empty() {
        None
    } else {
        Some(found)
    }
}
