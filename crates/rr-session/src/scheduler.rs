//! `RenderScheduler` — periodic refresh of a bounded card window.
//!
//! The active set is unbounded; the display is not.  Each tick the scheduler
//! reads at most `max_displayed` rides from the registry's ordering index
//! (newest first) and hands each to the presenter with its slot number, so
//! the cost of a tick depends on the window size, not on how many rides are
//! active.

use rr_core::{Period, Slot, Timestamp};
use rr_registry::RideRegistry;

use crate::Presenter;

/// Fixed-period sampler of the most recently touched rides.
#[derive(Clone, Debug)]
pub struct RenderScheduler {
    period:        Period,
    max_displayed: usize,
    ticks:         u64,
}

impl RenderScheduler {
    /// A disarmed scheduler.  Call [`arm`][Self::arm] when connected.
    pub fn new(tick_interval_ms: u64, max_displayed: usize) -> Self {
        Self {
            period: Period::from_millis(tick_interval_ms),
            max_displayed,
            ticks: 0,
        }
    }

    /// Start ticking; the first tick is due one interval after `now`.
    pub fn arm(&mut self, now: Timestamp) {
        self.period.arm(now);
    }

    /// Stop ticking until re-armed.
    pub fn disarm(&mut self) {
        self.period.disarm();
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.period.is_armed()
    }

    /// `true` when armed and a full interval has elapsed since the last tick.
    #[inline]
    pub fn due(&self, now: Timestamp) -> bool {
        self.period.due(now)
    }

    #[inline]
    pub fn max_displayed(&self) -> usize {
        self.max_displayed
    }

    /// Number of ticks that refreshed cards since creation.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Refresh the card window now, regardless of the period.
    ///
    /// Returns the number of slots refreshed: `min(active, max_displayed)`,
    /// or 0 while disarmed.
    pub fn tick<O: Presenter>(
        &mut self,
        registry:  &RideRegistry,
        presenter: &mut O,
        now:       Timestamp,
    ) -> usize {
        if !self.is_armed() {
            return 0;
        }
        let mut refreshed = 0;
        for (i, ride) in registry.most_recent(self.max_displayed).enumerate() {
            presenter.on_card(Slot(i as u32), ride);
            refreshed += 1;
        }
        self.period.mark(now);
        self.ticks += 1;
        refreshed
    }

    /// Tick only if one is due.  `None` when not due (or disarmed).
    pub fn poll<O: Presenter>(
        &mut self,
        registry:  &RideRegistry,
        presenter: &mut O,
        now:       Timestamp,
    ) -> Option<usize> {
        if !self.due(now) {
            return None;
        }
        Some(self.tick(registry, presenter, now))
    }
}
