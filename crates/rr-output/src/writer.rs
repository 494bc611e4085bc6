//! The `OutputWriter` trait implemented by recording backends.

use crate::{NotificationRow, OutputResult, StatsRow};

/// A sink for recorded session output.
///
/// Errors are stored by the presenter and retrieved with
/// [`RecordingPresenter::take_error`][crate::RecordingPresenter::take_error].
pub trait OutputWriter {
    /// Write one stat snapshot row.
    fn write_stats(&mut self, row: &StatsRow) -> OutputResult<()>;

    /// Write one notification row.
    fn write_notification(&mut self, row: &NotificationRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
