//! Per-ride record.

use rr_core::{GeoPoint, RideEvent, RideId, RideStatus, Seq, Timestamp};

/// The most recently observed state of one active ride.
///
/// A `Ride` is always built from the event that last touched it, stamped
/// with the sequence number allocated at that moment.
#[derive(Debug, Clone, PartialEq)]
pub struct Ride {
    pub id: RideId,

    /// Status carried by the latest event (never terminal while registered).
    pub status: RideStatus,

    pub passenger_count: u32,

    /// Fare accrued so far.
    pub meter_reading: f64,

    pub position: GeoPoint,

    /// Upstream timestamp of the latest event.
    pub event_time: Timestamp,

    /// Local display-ordering stamp.  Larger means more recently touched.
    pub seq: Seq,
}

impl Ride {
    /// Build the record for `event`, stamped with `seq`.
    pub fn from_event(event: &RideEvent, seq: Seq) -> Self {
        Self {
            id:              event.id.clone(),
            status:          event.status.clone(),
            passenger_count: event.passenger_count,
            meter_reading:   event.meter_reading,
            position:        event.position,
            event_time:      event.timestamp,
            seq,
        }
    }
}
