//! The `EventClassifier` — applies one event to the registry and reports what
//! happened.

use rr_core::RideEvent;
use rr_registry::{Ride, RideRegistry};

use crate::{Notification, NotificationPolicy, SilentFirstPickup};

/// What an event turned out to be.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ClassificationKind {
    /// First sighting of an id; inserted into the registry.
    NewRide,
    /// Repeat pickup for a tracked ride; replaced in the registry.
    PickupNotify,
    /// In-progress update for a tracked ride; replaced in the registry.
    Update,
    /// Terminal event for a tracked ride; removed from the registry.
    DropoffNotify,
    /// Terminal event for an id that is not tracked (never seen, or already
    /// dropped off).  The registry is untouched.
    Ignored,
}

impl ClassificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassificationKind::NewRide       => "new-ride",
            ClassificationKind::PickupNotify  => "pickup-notify",
            ClassificationKind::Update        => "update",
            ClassificationKind::DropoffNotify => "dropoff-notify",
            ClassificationKind::Ignored       => "ignored",
        }
    }
}

/// Result of classifying one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub kind: ClassificationKind,

    /// The registry entry for this id as it was *before* the event.
    /// `None` for `NewRide` and `Ignored`.
    pub previous: Option<Ride>,

    /// Pop-up to present, if the policy asked for one.
    pub notification: Option<Notification>,
}

impl Classification {
    #[inline]
    pub fn is_new_ride(&self) -> bool {
        self.kind == ClassificationKind::NewRide
    }
}

/// Classifies events and performs the matching registry mutation.
///
/// The classifier holds no ride state of its own; everything lives in the
/// [`RideRegistry`] passed to [`classify`][Self::classify].
#[derive(Clone, Debug, Default)]
pub struct EventClassifier<P: NotificationPolicy = SilentFirstPickup> {
    policy: P,
}

impl EventClassifier<SilentFirstPickup> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: NotificationPolicy> EventClassifier<P> {
    pub fn with_policy(policy: P) -> Self {
        Self { policy }
    }

    /// Apply `event` to `registry`.
    ///
    /// Every branch completes its registry mutation before returning, so the
    /// caller always observes a consistent registry.
    pub fn classify(&self, registry: &mut RideRegistry, event: &RideEvent) -> Classification {
        let tracked = registry.contains(event.id.as_str());
        let notification = self
            .policy
            .notification_for(tracked, &event.status)
            .map(|kind| Notification::for_event(kind, event));

        if !tracked {
            if event.is_terminal() {
                return Classification {
                    kind:         ClassificationKind::Ignored,
                    previous:     None,
                    notification: None,
                };
            }
            let seq = registry.allocate_seq();
            registry.upsert(Ride::from_event(event, seq));
            return Classification {
                kind:         ClassificationKind::NewRide,
                previous:     None,
                notification,
            };
        }

        if event.is_terminal() {
            let previous = registry.remove(event.id.as_str());
            return Classification {
                kind: ClassificationKind::DropoffNotify,
                previous,
                notification,
            };
        }

        let kind = if event.status.is_pickup() {
            ClassificationKind::PickupNotify
        } else {
            ClassificationKind::Update
        };
        let seq = registry.allocate_seq();
        let previous = registry.upsert(Ride::from_event(event, seq));
        Classification { kind, previous, notification }
    }
}
