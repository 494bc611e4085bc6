//! Notification policy — which transitions deserve a pop-up.

use rr_core::RideStatus;

use crate::NotificationKind;

/// Decides whether an event produces a notification.
///
/// `tracked` is `true` when the ride was already in the registry before the
/// event arrived.  Implementations must be pure: the classifier may call
/// this before it knows which registry mutation will follow.
pub trait NotificationPolicy {
    fn notification_for(&self, tracked: bool, status: &RideStatus) -> Option<NotificationKind>;
}

/// Default policy.
///
/// The first event for an id is always silent, even if it is a pickup.  A
/// pickup for an already tracked ride, or a dropoff of a tracked ride, is
/// announced.
#[derive(Copy, Clone, Debug, Default)]
pub struct SilentFirstPickup;

impl NotificationPolicy for SilentFirstPickup {
    fn notification_for(&self, tracked: bool, status: &RideStatus) -> Option<NotificationKind> {
        silent_first_pickup(tracked, status)
    }
}

/// The rule behind [`SilentFirstPickup`], usable without a policy value.
pub fn silent_first_pickup(tracked: bool, status: &RideStatus) -> Option<NotificationKind> {
    if !tracked {
        return None;
    }
    match status {
        RideStatus::Dropoff => Some(NotificationKind::Dropoff),
        RideStatus::Pickup  => Some(NotificationKind::Pickup),
        _                   => None,
    }
}
