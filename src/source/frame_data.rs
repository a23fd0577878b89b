use crate::error::FrameDataError;
use crate::frame::cell::CellError;
use crate::frame::label::Label;
use crate::frame::{Frame, FrameError, SharedFrame};
use crate::source::options::{FrameDataOptions, LabelMode};
use crate::source::{DataSource, ProfileValue};
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::{Rc, Weak};

/// Column count up to which the description lists the column labels.
const DESCRIBE_MAX_COLUMNS: usize = 10;

/// Data source backed by a labeled table.
///
/// Rows are time steps and columns are profiles. The table stays with its
/// owner: only a weak handle is kept, every read goes to the live table, and
/// changes made through other handles show up on the next call. No locking is
/// done here beyond `RefCell`'s own borrow check.
#[derive(Clone, Debug)]
pub struct FrameData {
    frame: Weak<RefCell<Frame>>,
}

impl FrameData {
    /// Wraps a table, keeping its labels as they are.
    pub fn new(frame: &SharedFrame) -> Self {
        if let Ok(table) = frame.try_borrow() {
            log::debug!(
                "Created frame data source over {} rows and {} columns",
                table.len(),
                table.column_count()
            );
        }
        Self {
            frame: Rc::downgrade(frame),
        }
    }

    /// Coerces the table's row and column labels to integers in place, then wraps it.
    ///
    /// # Errors
    ///
    /// Returns a conversion error, leaving the table untouched, if any label is
    /// not integer valued, or `Busy` if the table is borrowed elsewhere.
    pub fn with_integer_labels(frame: &SharedFrame) -> Result<Self, FrameDataError> {
        frame
            .try_borrow_mut()
            .map_err(|_| FrameError::Busy)?
            .coerce_labels_to_int()?;
        Ok(Self::new(frame))
    }

    /// Wraps a table according to the given options.
    pub fn with_options(frame: &SharedFrame, options: FrameDataOptions) -> Result<Self, FrameDataError> {
        match options.label_mode {
            LabelMode::Keep => Ok(Self::new(frame)),
            LabelMode::Integer => Self::with_integer_labels(frame),
        }
    }

    /// Runs `reader` against the live table.
    fn read<T>(&self, reader: impl FnOnce(&Frame) -> Result<T, FrameDataError>) -> Result<T, FrameDataError> {
        let shared = self.frame.upgrade().ok_or(FrameError::Detached)?;
        let frame = shared.try_borrow().map_err(|_| FrameError::Busy)?;
        reader(&frame)
    }
}

impl DataSource for FrameData {
    fn scaled_time_step_value(
        &self,
        time_step: &Label,
        profile_name: &Label,
        scale_factor: f64,
    ) -> Result<ProfileValue, FrameDataError> {
        self.read(|frame| {
            let rows = frame.row_positions(time_step)?;
            let cols = frame.column_positions(profile_name)?;
            log::trace!(
                "Reading '{}' at time step '{}' ({} rows, {} columns)",
                profile_name,
                time_step,
                rows.len(),
                cols.len()
            );
            let mut values = Vec::with_capacity(rows.len() * cols.len());
            for cell in frame.cells_at(&rows, &cols) {
                let value = cell.to_double().ok_or_else(|| CellError::NotNumeric {
                    time_step: time_step.clone(),
                    profile: profile_name.clone(),
                    value: cell.to_string(),
                })?;
                values.push(value);
            }
            let value = match values.as_slice() {
                [value] => ProfileValue::Scalar(*value),
                _ => ProfileValue::Sequence(values),
            };
            Ok(value.scaled(scale_factor))
        })
    }

    fn time_steps_len(&self) -> Result<usize, FrameDataError> {
        self.read(|frame| Ok(frame.len()))
    }
}

impl Display for FrameData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(shared) = self.frame.upgrade() else {
            return write!(f, "FrameData with detached table");
        };
        let Ok(frame) = shared.try_borrow() else {
            return write!(f, "FrameData with table in use");
        };
        write!(f, "FrameData with {} rows and {} columns", frame.len(), frame.column_count())?;
        if frame.column_count() <= DESCRIBE_MAX_COLUMNS {
            let labels: Vec<String> = frame.columns().iter().map(Label::repr).collect();
            write!(f, ": [{}]", labels.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::cell::CellValue;
    use proptest::prelude::*;

    fn numbers(values: &[f64]) -> Vec<CellValue> {
        values.iter().map(|it| CellValue::from(*it)).collect()
    }

    /// Rows [0, 1, 2], columns ["p1", "p2"], cell (1, "p2") = 4.0.
    fn scenario_frame() -> SharedFrame {
        Frame::from_rows(
            vec![Label::from(0), Label::from(1), Label::from(2)],
            vec![Label::from("p1"), Label::from("p2")],
            vec![numbers(&[1.0, 2.0]), numbers(&[3.0, 4.0]), numbers(&[5.0, 6.0])],
        )
        .unwrap()
        .into_shared()
    }

    #[test]
    fn frame_data_scenario() {
        let shared = scenario_frame();
        let source = FrameData::new(&shared);

        let value = source.time_step_value(&Label::from(1), &Label::from("p2")).unwrap();
        assert_eq!(value, ProfileValue::Scalar(4.0));
        let value = source
            .scaled_time_step_value(&Label::from(1), &Label::from("p2"), 2.0)
            .unwrap();
        assert_eq!(value, ProfileValue::Scalar(8.0));
        assert_eq!(source.time_steps_len().unwrap(), 3);
    }

    #[test]
    fn frame_data_unknown_time_step() {
        let shared = scenario_frame();
        let source = FrameData::new(&shared);

        let error = source.time_step_value(&Label::from(5), &Label::from("p2")).unwrap_err();
        assert!(error.is_lookup());
        assert!(matches!(error, FrameDataError::FrameError(FrameError::RowNotFound(Label::Int(5)))));
    }

    #[test]
    fn frame_data_unknown_profile() {
        let shared = scenario_frame();
        let source = FrameData::new(&shared);

        let error = source.time_step_value(&Label::from(1), &Label::from("p3")).unwrap_err();
        assert!(error.is_lookup());
        assert!(matches!(error, FrameDataError::FrameError(FrameError::ColumnNotFound(_))));
    }

    #[test]
    fn frame_data_every_cell_is_returned() {
        let shared = scenario_frame();
        let source = FrameData::new(&shared);

        for (row, expected) in [(0i64, [1.0, 2.0]), (1, [3.0, 4.0]), (2, [5.0, 6.0])] {
            for (profile, expected) in ["p1", "p2"].iter().zip(expected) {
                let value = source.time_step_value(&Label::from(row), &Label::from(*profile)).unwrap();
                assert_eq!(value, ProfileValue::Scalar(expected));
            }
        }
    }

    #[test]
    fn frame_data_duplicate_columns() {
        let shared = Frame::from_rows(
            vec![Label::from(0), Label::from(1)],
            vec![Label::from("load"), Label::from("sgen"), Label::from("load")],
            vec![numbers(&[1.0, 2.0, 3.0]), numbers(&[4.0, 5.0, 6.0])],
        )
        .unwrap()
        .into_shared();
        let source = FrameData::new(&shared);

        let value = source
            .scaled_time_step_value(&Label::from(1), &Label::from("load"), 10.0)
            .unwrap();
        assert_eq!(value, ProfileValue::Sequence(vec![40.0, 60.0]));
        let value = source.time_step_value(&Label::from(1), &Label::from("sgen")).unwrap();
        assert_eq!(value, ProfileValue::Scalar(5.0));
    }

    #[test]
    fn frame_data_duplicate_rows() {
        let shared = Frame::from_rows(
            vec![Label::from(0), Label::from(0)],
            vec![Label::from("p1")],
            vec![numbers(&[1.0]), numbers(&[2.0])],
        )
        .unwrap()
        .into_shared();
        let source = FrameData::new(&shared);

        let value = source.time_step_value(&Label::from(0), &Label::from("p1")).unwrap();
        assert_eq!(value, ProfileValue::Sequence(vec![1.0, 2.0]));
    }

    #[test]
    fn frame_data_text_cell_is_type_error() {
        let shared = Frame::from_rows(
            vec![Label::from(0)],
            vec![Label::from("p1")],
            vec![vec![CellValue::from("n/a")]],
        )
        .unwrap()
        .into_shared();
        let source = FrameData::new(&shared);

        let error = source.time_step_value(&Label::from(0), &Label::from("p1")).unwrap_err();
        assert!(error.is_type());
        assert!(!error.is_lookup());
    }

    #[test]
    fn frame_data_reads_live_table() {
        let shared = scenario_frame();
        let source = FrameData::new(&shared);
        assert_eq!(source.time_steps_len().unwrap(), 3);

        shared.borrow_mut().push_row(Label::from(3), numbers(&[7.0, 8.0])).unwrap();
        assert_eq!(source.time_steps_len().unwrap(), 4);
        let value = source.time_step_value(&Label::from(3), &Label::from("p1")).unwrap();
        assert_eq!(value, ProfileValue::Scalar(7.0));

        shared
            .borrow_mut()
            .set(&Label::from(1), &Label::from("p2"), CellValue::from(-1.0))
            .unwrap();
        let value = source.time_step_value(&Label::from(1), &Label::from("p2")).unwrap();
        assert_eq!(value, ProfileValue::Scalar(-1.0));

        shared.borrow_mut().remove_row(&Label::from(0));
        shared.borrow_mut().remove_row(&Label::from(1));
        assert_eq!(source.time_steps_len().unwrap(), 2);
    }

    #[test]
    fn frame_data_integer_labels() {
        let shared = Frame::from_rows(
            vec![Label::from("0"), Label::from("1"), Label::from("2")],
            vec![Label::from("0"), Label::from("1")],
            vec![numbers(&[1.0, 2.0]), numbers(&[3.0, 4.0]), numbers(&[5.0, 6.0])],
        )
        .unwrap()
        .into_shared();
        let source = FrameData::with_integer_labels(&shared).unwrap();

        assert_eq!(shared.borrow().index(), &[Label::Int(0), Label::Int(1), Label::Int(2)]);
        assert_eq!(shared.borrow().columns(), &[Label::Int(0), Label::Int(1)]);
        let value = source.time_step_value(&Label::from(2), &Label::from(1)).unwrap();
        assert_eq!(value, ProfileValue::Scalar(6.0));
        assert!(source.time_step_value(&Label::from("2"), &Label::from(1)).unwrap_err().is_lookup());
    }

    #[test]
    fn frame_data_integer_labels_failure() {
        let shared = scenario_frame();
        let before = shared.borrow().clone();
        let error = FrameData::with_options(&shared, FrameDataOptions::with_label_mode(LabelMode::Integer))
            .unwrap_err();

        assert!(error.is_type());
        assert_eq!(*shared.borrow(), before);
    }

    #[test]
    fn frame_data_keep_labels_option() {
        let shared = Frame::from_rows(
            vec![Label::from("0")],
            vec![Label::from("p1")],
            vec![numbers(&[1.0])],
        )
        .unwrap()
        .into_shared();
        let source = FrameData::with_options(&shared, FrameDataOptions::default()).unwrap();

        assert_eq!(shared.borrow().index(), &[Label::from("0")]);
        assert!(source.time_step_value(&Label::from("0"), &Label::from("p1")).is_ok());
    }

    #[test]
    fn frame_data_detached() {
        let shared = scenario_frame();
        let source = FrameData::new(&shared);
        drop(shared);

        let error = source.time_steps_len().unwrap_err();
        assert!(matches!(error, FrameDataError::FrameError(FrameError::Detached)));
        assert_eq!(source.to_string(), "FrameData with detached table");
    }

    #[test]
    fn frame_data_busy() {
        let shared = scenario_frame();
        let source = FrameData::new(&shared);
        let guard = shared.borrow_mut();

        let error = source.time_steps_len().unwrap_err();
        assert!(matches!(error, FrameDataError::FrameError(FrameError::Busy)));
        assert!(error.is_lookup());
        assert_eq!(source.to_string(), "FrameData with table in use");
        assert!(matches!(
            FrameData::with_integer_labels(&shared).map(|_| ()),
            Err(FrameDataError::FrameError(FrameError::Busy))
        ));
        drop(guard);

        assert_eq!(source.time_steps_len().unwrap(), 3);
    }

    #[test]
    fn frame_data_describe() {
        let shared = scenario_frame();
        let source = FrameData::new(&shared);
        assert_eq!(source.to_string(), "FrameData with 3 rows and 2 columns: ['p1' 'p2']");

        let shared = Frame::new((0..3i64).map(Label::from).collect()).into_shared();
        let source = FrameData::new(&shared);
        assert_eq!(source.to_string(), "FrameData with 0 rows and 3 columns: [0 1 2]");

        let shared = Frame::new((0..11i64).map(Label::from).collect()).into_shared();
        let source = FrameData::new(&shared);
        assert_eq!(source.to_string(), "FrameData with 0 rows and 11 columns");
    }

    proptest! {
        #[test]
        fn prop_scaled_value_is_cell_times_factor(cell in -1.0e6f64..1.0e6, factor in -1.0e3f64..1.0e3) {
            let shared = Frame::from_rows(
                vec![Label::from(0)],
                vec![Label::from("p")],
                vec![vec![CellValue::from(cell)]],
            )
            .unwrap()
            .into_shared();
            let source = FrameData::new(&shared);

            let value = source.scaled_time_step_value(&Label::from(0), &Label::from("p"), factor).unwrap();
            prop_assert_eq!(value, ProfileValue::Scalar(cell * factor));
            let value = source.time_step_value(&Label::from(0), &Label::from("p")).unwrap();
            prop_assert_eq!(value, ProfileValue::Scalar(cell));
        }

        #[test]
        fn prop_reads_are_idempotent(row in 0i64..3, column in 0usize..2, factor in -10.0f64..10.0) {
            let shared = scenario_frame();
            let source = FrameData::new(&shared);
            let profile = Label::from(["p1", "p2"][column]);

            let first = source.scaled_time_step_value(&Label::from(row), &profile, factor).unwrap();
            let second = source.scaled_time_step_value(&Label::from(row), &profile, factor).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
