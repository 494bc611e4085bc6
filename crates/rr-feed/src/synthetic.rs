//! Seeded synthetic ride stream.
//!
//! Stands in for the live transport in demos and tests.  Keeps up to
//! `concurrent` rides in flight and, at each step, advances one of them
//! chosen at random, so the output interleaves many rides the way the real
//! feed does.  Every ride emits exactly:
//!
//!   pickup (meter 0.00) → `updates` × enroute (meter rising) → dropoff
//!
//! Optionally, stray dropoffs for ids that were never picked up are mixed
//! in at `stray_dropoff_rate` to exercise the untracked-dropoff path.
//!
//! The same `seed` always reproduces the same stream.

use std::ops::RangeInclusive;

use chrono::TimeDelta;

use rr_core::{FeedRng, GeoPoint, RideEvent, RideId, RideStatus, Timestamp};

use crate::{FeedError, FeedResult};

/// Passenger counts drawn uniformly from this table (skewed toward 1).
const PASSENGER_TABLE: [u32; 10] = [1, 1, 1, 1, 1, 2, 2, 3, 4, 6];

/// Half-width of the pickup area around `center`, degrees.
const SPREAD_DEG: f64 = 0.05;

/// Rides that drift further than this from `center` turn back.
const MAX_RADIUS_M: f64 = 12_000.0;

/// Generator parameters.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Total rides to generate.
    pub rides: usize,
    /// Maximum rides in flight at once.
    pub concurrent: usize,
    /// Enroute updates per ride.
    pub updates: RangeInclusive<u32>,
    /// Centre of the pickup area.
    pub center: GeoPoint,
    /// Timestamp of the first event.
    pub start: Timestamp,
    /// Upstream time between consecutive events.
    pub spacing_ms: i64,
    /// Probability that a step emits a stray dropoff instead.  Must be in
    /// `[0, 1)`; a stray is never emitted twice in a row.
    pub stray_dropoff_rate: f64,
    pub seed: u64,
}

impl SyntheticConfig {
    /// Defaults around midtown Manhattan starting at `start`.
    pub fn new(rides: usize, seed: u64, start: Timestamp) -> Self {
        Self {
            rides,
            concurrent:         rides.clamp(1, 200),
            updates:            2..=8,
            center:             GeoPoint::new(40.7549, -73.9840),
            start,
            spacing_ms:         50,
            stray_dropoff_rate: 0.0,
            seed,
        }
    }

    pub fn validate(&self) -> FeedResult<()> {
        if !(0.0..1.0).contains(&self.stray_dropoff_rate) {
            return Err(FeedError::Invalid(format!(
                "stray_dropoff_rate {} must be in [0, 1)",
                self.stray_dropoff_rate
            )));
        }
        if self.concurrent == 0 {
            return Err(FeedError::Invalid("concurrent must be at least 1".into()));
        }
        Ok(())
    }
}

/// One ride still being emitted.
struct InFlight {
    id:           RideId,
    rng:          FeedRng,
    passengers:   u32,
    fare:         f64,
    position:     GeoPoint,
    heading:      (f64, f64),
    picked_up:    bool,
    updates_left: u32,
}

/// Iterator over a deterministic synthetic event stream.
pub struct SyntheticFeed {
    config:    SyntheticConfig,
    rng:       FeedRng,
    in_flight: Vec<InFlight>,
    started:   usize,
    strays:    u64,
    /// The previous step was a stray, so the next one advances a ride.
    owed_ride: bool,
    clock:     Timestamp,
}

impl SyntheticFeed {
    pub fn new(config: SyntheticConfig) -> Self {
        let rng = FeedRng::new(config.seed);
        let clock = config.start;
        Self {
            config,
            rng,
            in_flight: Vec::new(),
            started:   0,
            strays:    0,
            owed_ride: false,
            clock,
        }
    }

    fn start_ride(&mut self) {
        let index = self.started as u64;
        let mut rng = self.rng.child(index);
        let passengers = *rng.choose(&PASSENGER_TABLE).unwrap_or(&1);
        let position = GeoPoint::new(
            self.config.center.lat + rng.gen_range(-SPREAD_DEG..=SPREAD_DEG),
            self.config.center.lon + rng.gen_range(-SPREAD_DEG..=SPREAD_DEG),
        );
        let heading = (rng.gen_range(-0.001..=0.001), rng.gen_range(-0.001..=0.001));
        let updates_left = if self.config.updates.is_empty() {
            *self.config.updates.start()
        } else {
            rng.gen_range(self.config.updates.clone())
        };

        self.in_flight.push(InFlight {
            id: RideId::new(format!("ride-{index:06}")),
            rng,
            passengers,
            fare: 0.0,
            position,
            heading,
            picked_up: false,
            updates_left,
        });
        self.started += 1;
    }

    fn advance_clock(&mut self) -> Timestamp {
        let now = self.clock;
        self.clock += TimeDelta::milliseconds(self.config.spacing_ms);
        now
    }
}

impl Iterator for SyntheticFeed {
    type Item = RideEvent;

    fn next(&mut self) -> Option<RideEvent> {
        while self.in_flight.len() < self.config.concurrent.max(1)
            && self.started < self.config.rides
        {
            self.start_ride();
        }
        if self.in_flight.is_empty() {
            return None;
        }

        let stray = !self.owed_ride
            && self.config.stray_dropoff_rate > 0.0
            && self.rng.gen_bool(self.config.stray_dropoff_rate);
        self.owed_ride = stray;
        if stray {
            self.strays += 1;
            let id = format!("stray-{:06}", self.strays);
            let center = self.config.center;
            let ts = self.advance_clock();
            return Some(
                RideEvent::new(id, RideStatus::Dropoff, ts)
                    .with_fare(5.0)
                    .with_passengers(1)
                    .with_position(center),
            );
        }

        let i = self.rng.gen_range(0..self.in_flight.len());
        let ts = self.advance_clock();
        let center = self.config.center;
        let ride = &mut self.in_flight[i];

        let status = if !ride.picked_up {
            ride.picked_up = true;
            RideStatus::Pickup
        } else {
            // Whole cents, like a real meter.
            let increment: f64 = ride.rng.gen_range(40u32..=160) as f64 / 100.0;
            ride.fare = ((ride.fare + increment) * 100.0).round() / 100.0;
            ride.position = GeoPoint::new(
                ride.position.lat + ride.heading.0,
                ride.position.lon + ride.heading.1,
            );
            if ride.position.distance_m(center) > MAX_RADIUS_M {
                ride.heading = (-ride.heading.0, -ride.heading.1);
            }
            if ride.updates_left > 0 {
                ride.updates_left -= 1;
                RideStatus::Enroute
            } else {
                RideStatus::Dropoff
            }
        };

        let event = RideEvent::new(ride.id.clone(), status, ts)
            .with_fare(ride.fare)
            .with_passengers(ride.passengers)
            .with_position(ride.position);

        if event.is_terminal() {
            self.in_flight.swap_remove(i);
        }
        Some(event)
    }
}
