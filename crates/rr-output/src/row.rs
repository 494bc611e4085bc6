//! Plain data row types written by output backends.

use rr_classify::{Notification, NotificationKind};
use rr_core::Timestamp;
use rr_stats::StatsSnapshot;

/// One stat snapshot as pushed to the presenter after an event or reset.
///
/// Ratios with no data are `None` and written as empty cells.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsRow {
    pub taken_at:           Timestamp,
    pub events_processed:   u64,
    pub rate_per_sec:       Option<f64>,
    pub lag_ms:             Option<i64>,
    pub active_rides:       u64,
    pub total_fare:         f64,
    pub total_passengers:   u64,
    pub density:            Option<f64>,
    pub fare_per_passenger: Option<f64>,
}

impl From<&StatsSnapshot> for StatsRow {
    fn from(s: &StatsSnapshot) -> Self {
        Self {
            taken_at:           s.taken_at,
            events_processed:   s.events_processed,
            rate_per_sec:       s.rate_per_sec,
            lag_ms:             s.lag_ms,
            active_rides:       s.active_rides as u64,
            total_fare:         s.total_fare,
            total_passengers:   s.total_passengers,
            density:            s.density,
            fare_per_passenger: s.fare_per_passenger,
        }
    }
}

/// One pickup or dropoff notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRow {
    pub event_time: Timestamp,
    pub kind:       NotificationKind,
    pub ride_id:    String,
    pub status:     String,
    pub lat:        f64,
    pub lon:        f64,
    pub map_link:   String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            event_time: n.event_time,
            kind:       n.kind,
            ride_id:    n.ride_id.to_string(),
            status:     n.status.to_string(),
            lat:        n.position.lat,
            lon:        n.position.lon,
            map_link:   n.map_link.clone(),
        }
    }
}
