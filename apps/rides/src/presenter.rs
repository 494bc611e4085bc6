//! Console presenter, optionally teed into a CSV recording.

use log::{debug, info};

use rr_classify::Notification;
use rr_core::{Slot, Timestamp};
use rr_output::{CsvWriter, RecordingPresenter};
use rr_registry::Ride;
use rr_session::{ConnectionState, Presenter};
use rr_stats::StatsSnapshot;

/// Logs what a GUI would show, and records it to CSV when asked to.
pub struct AppPresenter {
    session:       usize,
    recorder:      Option<RecordingPresenter<CsvWriter>>,
    notifications: u64,
    cards:         u64,
}

impl AppPresenter {
    pub fn new(session: usize, recorder: Option<RecordingPresenter<CsvWriter>>) -> Self {
        Self {
            session,
            recorder,
            notifications: 0,
            cards:         0,
        }
    }

    pub fn notifications(&self) -> u64 {
        self.notifications
    }

    pub fn cards(&self) -> u64 {
        self.cards
    }

    /// Flush the recording, if any, and surface its first write error.
    pub fn finish(&mut self) -> anyhow::Result<()> {
        if let Some(rec) = &mut self.recorder {
            rec.finish();
            if let Some(e) = rec.take_error() {
                return Err(e.into());
            }
            let (stats, notes) = rec.rows_written();
            info!("[s{}] recorded {stats} stat rows, {notes} notifications", self.session);
        }
        Ok(())
    }
}

impl Presenter for AppPresenter {
    fn on_connection(&mut self, state: ConnectionState, at: Timestamp) {
        info!("[s{}] {state} at {}", self.session, at.to_rfc3339());
        if let Some(rec) = &mut self.recorder {
            rec.on_connection(state, at);
        }
    }

    fn on_notification(&mut self, n: &Notification) {
        self.notifications += 1;
        info!("[s{}] {n}", self.session);
        if let Some(rec) = &mut self.recorder {
            rec.on_notification(n);
        }
    }

    fn on_stats(&mut self, snapshot: &StatsSnapshot) {
        debug!("[s{}] {}", self.session, snapshot.labels());
        if let Some(rec) = &mut self.recorder {
            rec.on_stats(snapshot);
        }
    }

    fn on_card(&mut self, slot: Slot, ride: &Ride) {
        self.cards += 1;
        debug!(
            "[s{}] card {} ← {} {} ${:.2} {}p",
            self.session,
            slot.index(),
            ride.id,
            ride.status,
            ride.meter_reading,
            ride.passenger_count,
        );
    }

    fn on_clear(&mut self) {
        debug!("[s{}] cards cleared", self.session);
    }
}
