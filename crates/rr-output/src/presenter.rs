//! `RecordingPresenter<W>` — bridges `Presenter` to an `OutputWriter`.

use rr_classify::Notification;
use rr_session::Presenter;
use rr_stats::StatsSnapshot;

use crate::row::{NotificationRow, StatsRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`Presenter`] that records every stat snapshot and notification to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `Presenter` methods
/// have no return value.  After the run, call [`finish`][Self::finish] and
/// check for errors with [`take_error`][Self::take_error].
pub struct RecordingPresenter<W: OutputWriter> {
    writer:     W,
    stats_rows: u64,
    notes_rows: u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> RecordingPresenter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            stats_rows: 0,
            notes_rows: 0,
            last_error: None,
        }
    }

    /// Rows written as `(stats, notifications)`.
    pub fn rows_written(&self) -> (u64, u64) {
        (self.stats_rows, self.notes_rows)
    }

    /// Flush the writer.  Errors are stored like any other write error.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> Presenter for RecordingPresenter<W> {
    fn on_notification(&mut self, notification: &Notification) {
        let result = self.writer.write_notification(&NotificationRow::from(notification));
        if result.is_ok() {
            self.notes_rows += 1;
        }
        self.store_err(result);
    }

    fn on_stats(&mut self, snapshot: &StatsSnapshot) {
        let result = self.writer.write_stats(&StatsRow::from(snapshot));
        if result.is_ok() {
            self.stats_rows += 1;
        }
        self.store_err(result);
    }
}
