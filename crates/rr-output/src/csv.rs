//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `stats.csv`
//! - `notifications.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{NotificationRow, OutputResult, StatsRow};
use crate::writer::OutputWriter;

/// Writes recorded session output to two CSV files.
pub struct CsvWriter {
    stats:         Writer<File>,
    notifications: Writer<File>,
    finished:      bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files in it and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut stats = Writer::from_path(dir.join("stats.csv"))?;
        stats.write_record([
            "taken_at",
            "events_processed",
            "rate_per_sec",
            "lag_ms",
            "active_rides",
            "total_fare",
            "total_passengers",
            "density",
            "fare_per_passenger",
        ])?;

        let mut notifications = Writer::from_path(dir.join("notifications.csv"))?;
        notifications.write_record(["event_time", "kind", "ride_id", "status", "lat", "lon", "map_link"])?;

        Ok(Self {
            stats,
            notifications,
            finished: false,
        })
    }
}

/// Empty cell for `None`.
fn cell<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_stats(&mut self, row: &StatsRow) -> OutputResult<()> {
        self.stats.write_record(&[
            row.taken_at.to_rfc3339(),
            row.events_processed.to_string(),
            cell(row.rate_per_sec),
            cell(row.lag_ms),
            row.active_rides.to_string(),
            format!("{:.2}", row.total_fare),
            row.total_passengers.to_string(),
            cell(row.density),
            cell(row.fare_per_passenger),
        ])?;
        Ok(())
    }

    fn write_notification(&mut self, row: &NotificationRow) -> OutputResult<()> {
        self.notifications.write_record(&[
            row.event_time.to_rfc3339(),
            row.kind.to_string(),
            row.ride_id.clone(),
            row.status.clone(),
            row.lat.to_string(),
            row.lon.to_string(),
            row.map_link.clone(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.stats.flush()?;
        self.notifications.flush()?;
        Ok(())
    }
}
