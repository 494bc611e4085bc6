//! `rr-stats` — running aggregates over the active ride set.
//!
//! # Incremental model
//!
//! [`StatsAggregator`] never re-sums the registry.  Each event contributes a
//! delta derived from the registry transition it caused:
//!
//! | Transition          | Fare                       | Passengers            | Active |
//! |---------------------|----------------------------|-----------------------|--------|
//! | new ride            | `+ event.meter`            | `+ event.passengers`  | `+1`   |
//! | update              | `+ (event − prev).meter`   | `+ (event − prev)`    |        |
//! | dropoff (tracked)   | `− prev.meter`             | `− prev.passengers`   | `−1`   |
//! | dropoff (untracked) |                            |                       |        |
//!
//! Summed over any event sequence these deltas equal a from-scratch sum of
//! the registry's contents, which [`StatsAggregator::consistent_with`]
//! checks.  Derived ratios are `None` ("no data") whenever their denominator
//! is zero.

pub mod aggregator;
pub mod snapshot;


pub use aggregator::StatsAggregator;
pub use snapshot::{NO_DATA, StatLabels, StatsSnapshot};
