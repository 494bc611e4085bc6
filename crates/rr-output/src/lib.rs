//! `rr-output` — recording of session output for the rust_rides workspace.
//!
//! | Backend | Files created                          |
//! |---------|----------------------------------------|
//! | CSV     | `stats.csv`, `notifications.csv`       |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`RecordingPresenter`], which implements `rr_session::Presenter`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rr_output::{CsvWriter, RecordingPresenter};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut rec = RecordingPresenter::new(writer);
//! session.connect(now, &mut rec)?;
//! // … drive the session …
//! rec.finish();
//! rec.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod presenter;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use presenter::RecordingPresenter;
pub use row::{NotificationRow, StatsRow};
pub use writer::OutputWriter;
