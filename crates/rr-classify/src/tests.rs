//! Unit tests for rr-classify.

use chrono::{TimeDelta, TimeZone, Utc};

use rr_core::{GeoPoint, RideEvent, RideStatus, Timestamp};
use rr_registry::RideRegistry;

use crate::{ClassificationKind, EventClassifier, NotificationKind, NotificationPolicy};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn at(secs: i64) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() + TimeDelta::seconds(secs)
}

fn ev(id: &str, status: &str, fare: f64) -> RideEvent {
    RideEvent::new(id, RideStatus::parse(status), at(0))
        .with_fare(fare)
        .with_passengers(2)
        .with_position(GeoPoint::new(40.75, -73.99))
}

// ── Classification rules ──────────────────────────────────────────────────────

#[cfg(test)]
mod rules {
    use super::*;

    #[test]
    fn first_pickup_is_silent_new_ride() {
        let mut reg = RideRegistry::new();
        let c = EventClassifier::new().classify(&mut reg, &ev("1", "pickup", 0.0));
        assert_eq!(c.kind, ClassificationKind::NewRide);
        assert!(c.is_new_ride());
        assert!(c.notification.is_none());
        assert!(c.previous.is_none());
        assert!(reg.contains("1"));
    }

    #[test]
    fn first_enroute_is_new_ride() {
        let mut reg = RideRegistry::new();
        let c = EventClassifier::new().classify(&mut reg, &ev("1", "enroute", 3.0));
        assert_eq!(c.kind, ClassificationKind::NewRide);
        assert_eq!(reg.get("1").unwrap().meter_reading, 3.0);
    }

    #[test]
    fn repeat_pickup_notifies_and_resequences() {
        let mut reg = RideRegistry::new();
        let cls = EventClassifier::new();
        cls.classify(&mut reg, &ev("1", "pickup", 0.0));
        let first_seq = reg.get("1").unwrap().seq;

        let c = cls.classify(&mut reg, &ev("1", "pickup", 0.0));
        assert_eq!(c.kind, ClassificationKind::PickupNotify);
        let n = c.notification.unwrap();
        assert_eq!(n.kind, NotificationKind::Pickup);
        assert_eq!(n.ride_id.as_str(), "1");
        assert!(n.map_link.contains("40.750000,-73.990000"));
        assert_eq!(c.previous.unwrap().seq, first_seq);
        assert!(reg.get("1").unwrap().seq > first_seq);
    }

    #[test]
    fn update_replaces_without_notification() {
        let mut reg = RideRegistry::new();
        let cls = EventClassifier::new();
        cls.classify(&mut reg, &ev("1", "pickup", 0.0));
        let c = cls.classify(&mut reg, &ev("1", "meter-update", 5.5));
        assert_eq!(c.kind, ClassificationKind::Update);
        assert!(c.notification.is_none());
        assert_eq!(c.previous.unwrap().meter_reading, 0.0);
        assert_eq!(reg.get("1").unwrap().meter_reading, 5.5);
        assert_eq!(reg.active_count(), 1);
    }

    #[test]
    fn dropoff_of_tracked_ride_removes_and_notifies() {
        let mut reg = RideRegistry::new();
        let cls = EventClassifier::new();
        cls.classify(&mut reg, &ev("1", "pickup", 0.0));
        cls.classify(&mut reg, &ev("1", "enroute", 5.5));

        let c = cls.classify(&mut reg, &ev("1", "dropoff", 12.0));
        assert_eq!(c.kind, ClassificationKind::DropoffNotify);
        assert_eq!(c.notification.unwrap().kind, NotificationKind::Dropoff);
        // The removed record carries the latest known values, not the event's.
        assert_eq!(c.previous.unwrap().meter_reading, 5.5);
        assert!(!reg.contains("1"));
    }

    #[test]
    fn dropoff_of_unknown_ride_is_ignored() {
        let mut reg = RideRegistry::new();
        let c = EventClassifier::new().classify(&mut reg, &ev("ghost", "dropoff", 9.0));
        assert_eq!(c.kind, ClassificationKind::Ignored);
        assert!(c.notification.is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn duplicate_dropoff_second_is_ignored() {
        let mut reg = RideRegistry::new();
        let cls = EventClassifier::new();
        cls.classify(&mut reg, &ev("1", "pickup", 0.0));
        assert_eq!(
            cls.classify(&mut reg, &ev("1", "dropoff", 1.0)).kind,
            ClassificationKind::DropoffNotify,
        );
        assert_eq!(
            cls.classify(&mut reg, &ev("1", "dropoff", 1.0)).kind,
            ClassificationKind::Ignored,
        );
    }

    #[test]
    fn id_can_return_after_dropoff() {
        let mut reg = RideRegistry::new();
        let cls = EventClassifier::new();
        cls.classify(&mut reg, &ev("1", "pickup", 0.0));
        cls.classify(&mut reg, &ev("1", "dropoff", 4.0));
        let c = cls.classify(&mut reg, &ev("1", "pickup", 0.0));
        assert_eq!(c.kind, ClassificationKind::NewRide);
        assert!(c.notification.is_none());
    }
}

// ── Policy seam ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod policy {
    use super::*;
    use crate::policy::silent_first_pickup;

    #[test]
    fn default_rule_table() {
        assert_eq!(silent_first_pickup(false, &RideStatus::Pickup), None);
        assert_eq!(silent_first_pickup(false, &RideStatus::Dropoff), None);
        assert_eq!(silent_first_pickup(true, &RideStatus::Pickup), Some(NotificationKind::Pickup));
        assert_eq!(silent_first_pickup(true, &RideStatus::Dropoff), Some(NotificationKind::Dropoff));
        assert_eq!(silent_first_pickup(true, &RideStatus::Enroute), None);
    }

    /// Announces every pickup, including first sightings.
    struct LoudPickups;

    impl NotificationPolicy for LoudPickups {
        fn notification_for(&self, _tracked: bool, status: &RideStatus) -> Option<NotificationKind> {
            status.is_pickup().then_some(NotificationKind::Pickup)
        }
    }

    #[test]
    fn custom_policy_changes_notifications_not_registry_flow() {
        let mut reg = RideRegistry::new();
        let cls = EventClassifier::with_policy(LoudPickups);
        let c = cls.classify(&mut reg, &ev("1", "pickup", 0.0));
        assert_eq!(c.kind, ClassificationKind::NewRide);
        assert_eq!(c.notification.unwrap().kind, NotificationKind::Pickup);

        let c = cls.classify(&mut reg, &ev("1", "dropoff", 2.0));
        assert_eq!(c.kind, ClassificationKind::DropoffNotify);
        assert!(c.notification.is_none());
        assert!(reg.is_empty());
    }
}
