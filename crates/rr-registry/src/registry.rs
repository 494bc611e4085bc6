//! The `RideRegistry` — active rides keyed by id, plus a display-order index.

use std::collections::BTreeMap;

use rr_core::{RideId, Seq};
use rustc_hash::FxHashMap;

use crate::Ride;

/// Holds the latest record for every active ride.
///
/// `rides` is the source of truth.  `order` maps each ride's current `Seq`
/// back to its id so the display window can be read newest-first without
/// sorting; it always has exactly one entry per ride in `rides`.
///
/// Id operations are O(1) amortized; maintaining `order` adds O(log n) per
/// upsert/remove.
#[derive(Default)]
pub struct RideRegistry {
    rides:    FxHashMap<RideId, Ride>,
    order:    BTreeMap<Seq, RideId>,
    next_seq: Seq,
}

impl RideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next sequence number.
    ///
    /// Monotonic for the registry's lifetime; [`clear`][Self::clear] does not
    /// rewind it.
    pub fn allocate_seq(&mut self) -> Seq {
        let seq = self.next_seq;
        self.next_seq = seq.next();
        seq
    }

    /// Insert `ride`, or replace the existing entry with the same id.
    ///
    /// Returns the replaced record, if any.  `ride.seq` should come from
    /// [`allocate_seq`][Self::allocate_seq].  A seq already held by a
    /// different ride is replaced with a fresh one, so no ride ever drops
    /// out of the display order.
    pub fn upsert(&mut self, mut ride: Ride) -> Option<Ride> {
        if self.order.get(&ride.seq).is_some_and(|id| *id != ride.id) {
            ride.seq = self.allocate_seq();
        } else if ride.seq >= self.next_seq {
            self.next_seq = ride.seq.next();
        }
        let seq = ride.seq;
        let id  = ride.id.clone();
        let previous = self.rides.insert(id.clone(), ride);
        if let Some(prev) = &previous {
            if prev.seq != seq {
                self.order.remove(&prev.seq);
            }
        }
        self.order.insert(seq, id);
        previous
    }

    /// Remove the entry for `id`.  Absent ids are a no-op returning `None`.
    pub fn remove(&mut self, id: &str) -> Option<Ride> {
        let ride = self.rides.remove(id)?;
        self.order.remove(&ride.seq);
        Some(ride)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&Ride> {
        self.rides.get(id)
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.rides.contains_key(id)
    }

    /// Number of active rides.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.rides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }

    /// Drop every entry (reset / reconnect).
    pub fn clear(&mut self) {
        self.rides.clear();
        self.order.clear();
    }

    /// Up to `n` rides, most recently touched first.
    pub fn most_recent(&self, n: usize) -> impl Iterator<Item = &Ride> + '_ {
        self.order
            .values()
            .rev()
            .take(n)
            .filter_map(|id| self.rides.get(id.as_str()))
    }

    /// All active rides in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Ride> + '_ {
        self.rides.values()
    }

    /// Fare summed from scratch over all entries.
    ///
    /// O(n); used to cross-check the incrementally maintained totals.
    pub fn sum_fare(&self) -> f64 {
        self.rides.values().map(|r| r.meter_reading).sum()
    }

    /// Passengers summed from scratch over all entries.
    pub fn sum_passengers(&self) -> u64 {
        self.rides.values().map(|r| r.passenger_count as u64).sum()
    }
}
