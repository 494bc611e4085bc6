//! The decoded inbound event record.

use crate::{GeoPoint, RideId, RideStatus, Timestamp};

/// One decoded ride event, as handed to the core by the boundary layer.
///
/// The boundary guarantees the record is well formed; the core never sees a
/// partially decoded event.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideEvent {
    pub id: RideId,
    pub status: RideStatus,
    /// When upstream generated the event.
    pub timestamp: Timestamp,
    pub position: GeoPoint,
    /// Fare accrued so far.
    pub meter_reading: f64,
    pub passenger_count: u32,
}

impl RideEvent {
    /// An event with zero fare, zero passengers, at the origin.
    ///
    /// Combine with the `with_*` setters to build test and synthetic events.
    pub fn new(id: impl Into<RideId>, status: RideStatus, timestamp: Timestamp) -> Self {
        Self {
            id: id.into(),
            status,
            timestamp,
            position: GeoPoint::default(),
            meter_reading: 0.0,
            passenger_count: 0,
        }
    }

    pub fn with_fare(mut self, meter_reading: f64) -> Self {
        self.meter_reading = meter_reading;
        self
    }

    pub fn with_passengers(mut self, passenger_count: u32) -> Self {
        self.passenger_count = passenger_count;
        self
    }

    pub fn with_position(mut self, position: GeoPoint) -> Self {
        self.position = position;
        self
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
