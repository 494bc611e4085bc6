//! The `StatsAggregator` and its delta rules.

use rr_core::time::{millis_between, secs_since};
use rr_core::{RideEvent, Timestamp};
use rr_registry::{Ride, RideRegistry};

use crate::StatsSnapshot;

/// Process-wide running totals for one session.
///
/// Created (and re-created via [`reset`][Self::reset]) with the timestamp the
/// throughput rate is measured against.
#[derive(Clone, Debug)]
pub struct StatsAggregator {
    total_fare:       f64,
    total_passengers: u64,
    active_rides:     usize,
    events_processed: u64,
    reset_at:         Timestamp,
    last_lag_ms:      Option<i64>,
}

impl StatsAggregator {
    pub fn new(now: Timestamp) -> Self {
        Self {
            total_fare:       0.0,
            total_passengers: 0,
            active_rides:     0,
            events_processed: 0,
            reset_at:         now,
            last_lag_ms:      None,
        }
    }

    /// Zero every counter and restart the throughput clock at `now`.
    pub fn reset(&mut self, now: Timestamp) {
        *self = Self::new(now);
    }

    /// Fold one event into the totals.
    ///
    /// `is_new_ride` is `true` when the event created a registry entry.
    /// `previous` is the registry entry for the id before the event, which
    /// for a dropoff holds the latest known fare and passengers.
    pub fn apply(
        &mut self,
        event:       &RideEvent,
        is_new_ride: bool,
        previous:    Option<&Ride>,
        now:         Timestamp,
    ) {
        self.events_processed += 1;
        self.last_lag_ms = Some(millis_between(now, event.timestamp));

        if event.is_terminal() {
            if let Some(prev) = previous {
                self.total_fare -= prev.meter_reading;
                self.total_passengers =
                    self.total_passengers.saturating_sub(prev.passenger_count as u64);
                self.active_rides = self.active_rides.saturating_sub(1);
            }
        } else if is_new_ride {
            self.total_fare += event.meter_reading;
            self.total_passengers += event.passenger_count as u64;
            self.active_rides += 1;
        } else if let Some(prev) = previous {
            self.total_fare += event.meter_reading - prev.meter_reading;
            let delta = event.passenger_count as i64 - prev.passenger_count as i64;
            self.total_passengers = self.total_passengers.saturating_add_signed(delta);
        }

        // An empty registry sums to exactly zero.
        if self.active_rides == 0 {
            self.total_fare = 0.0;
            self.total_passengers = 0;
        }
    }

    // ── Raw counters ──────────────────────────────────────────────────────

    #[inline]
    pub fn total_fare(&self) -> f64 {
        self.total_fare
    }

    #[inline]
    pub fn total_passengers(&self) -> u64 {
        self.total_passengers
    }

    #[inline]
    pub fn active_rides(&self) -> usize {
        self.active_rides
    }

    #[inline]
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    #[inline]
    pub fn reset_at(&self) -> Timestamp {
        self.reset_at
    }

    /// Lag of the most recent event, in milliseconds.
    #[inline]
    pub fn last_lag_ms(&self) -> Option<i64> {
        self.last_lag_ms
    }

    // ── Derived values ────────────────────────────────────────────────────

    /// Average passengers per active ride.
    pub fn density(&self) -> Option<f64> {
        (self.active_rides > 0).then(|| self.total_passengers as f64 / self.active_rides as f64)
    }

    /// Average accrued fare per passenger.
    pub fn fare_per_passenger(&self) -> Option<f64> {
        (self.total_passengers > 0).then(|| self.total_fare / self.total_passengers as f64)
    }

    /// Events per second since the last reset.
    pub fn throughput(&self, now: Timestamp) -> Option<f64> {
        let secs = secs_since(now, self.reset_at);
        (secs > 0.0).then(|| self.events_processed as f64 / secs)
    }

    /// Immutable view of every aggregate at `now`.
    pub fn snapshot(&self, now: Timestamp) -> StatsSnapshot {
        StatsSnapshot {
            taken_at:           now,
            events_processed:   self.events_processed,
            rate_per_sec:       self.throughput(now),
            lag_ms:             self.last_lag_ms,
            active_rides:       self.active_rides,
            total_fare:         self.total_fare,
            total_passengers:   self.total_passengers,
            density:            self.density(),
            fare_per_passenger: self.fare_per_passenger(),
        }
    }

    /// `true` when the running totals match a from-scratch sum of `registry`
    /// (fare within `fare_tolerance`).  O(n).
    pub fn consistent_with(&self, registry: &RideRegistry, fare_tolerance: f64) -> bool {
        self.active_rides == registry.active_count()
            && self.total_passengers == registry.sum_passengers()
            && (self.total_fare - registry.sum_fare()).abs() <= fare_tolerance
    }
}
