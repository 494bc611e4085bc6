//! One-shot pop-up notifications for pickup and dropoff transitions.

use rr_core::{GeoPoint, RideEvent, RideId, RideStatus, Timestamp};

/// Which transition a notification announces.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum NotificationKind {
    Pickup,
    Dropoff,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Pickup  => "pickup",
            NotificationKind::Dropoff => "dropoff",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload handed to the presentation side for a transient flash.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind:       NotificationKind,
    pub ride_id:    RideId,
    pub status:     RideStatus,
    pub position:   GeoPoint,
    /// Pre-formatted web-map link for `position`.
    pub map_link:   String,
    pub event_time: Timestamp,
}

impl Notification {
    /// Build the notification for `event`.
    pub fn for_event(kind: NotificationKind, event: &RideEvent) -> Self {
        Self {
            kind,
            ride_id:    event.id.clone(),
            status:     event.status.clone(),
            position:   event.position,
            map_link:   event.position.map_link(),
            event_time: event.timestamp,
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} at {} {}", self.kind, self.ride_id, self.position, self.map_link)
    }
}
