//! The `Session` struct: connection state machine plus event and tick paths.

use log::{debug, info};

use rr_classify::{
    Classification, ClassificationKind, EventClassifier, NotificationPolicy, SilentFirstPickup,
};
use rr_core::{RideEvent, SessionConfig, Timestamp};
use rr_registry::RideRegistry;
use rr_stats::{StatsAggregator, StatsSnapshot};

use crate::{ConnectionState, Presenter, RenderScheduler, SessionError, SessionResult};

/// Fare tolerance used by [`Session::check_consistency`].
const FARE_TOLERANCE: f64 = 1e-6;

/// One client's isolated live view: registry, aggregates, scheduler and
/// connection state.
///
/// Create via [`SessionBuilder`][crate::SessionBuilder].  Sessions share
/// nothing; a server fanning out to many clients owns one per client.
pub struct Session<P: NotificationPolicy = SilentFirstPickup> {
    pub(crate) config:     SessionConfig,
    pub(crate) state:      ConnectionState,
    pub(crate) registry:   RideRegistry,
    pub(crate) stats:      StatsAggregator,
    pub(crate) classifier: EventClassifier<P>,
    pub(crate) scheduler:  RenderScheduler,
}

impl<P: NotificationPolicy> Session<P> {
    // ── Connection state machine ──────────────────────────────────────────

    /// Disconnected → Connected after a successful transport handshake.
    ///
    /// Starts from a clean slate: aggregates reset at `now`, registry and
    /// view cleared, card ticks armed.
    pub fn connect<O: Presenter>(&mut self, now: Timestamp, presenter: &mut O) -> SessionResult<()> {
        if self.state.is_connected() {
            return Err(SessionError::AlreadyConnected);
        }
        self.reset_all(now, presenter);
        self.scheduler.arm(now);
        self.set_state(ConnectionState::Connected, now, presenter);
        Ok(())
    }

    /// Connected → Disconnected because the transport closed or failed.
    ///
    /// Runs the same reset as [`connect`][Self::connect] so a later reconnect
    /// starts clean.  No-op when already disconnected.
    pub fn transport_lost<O: Presenter>(&mut self, now: Timestamp, presenter: &mut O) {
        if !self.state.is_connected() {
            debug!("transport loss while already disconnected; ignoring");
            return;
        }
        self.scheduler.disarm();
        self.reset_all(now, presenter);
        self.set_state(ConnectionState::Disconnected, now, presenter);
    }

    /// Connected → Disconnected at the user's request.
    ///
    /// Registry and aggregates are cleared.  The cards and stat labels on
    /// screen are left as they were unless
    /// `config.clear_display_on_user_disconnect` is set.
    pub fn disconnect<O: Presenter>(&mut self, now: Timestamp, presenter: &mut O) {
        if !self.state.is_connected() {
            return;
        }
        self.scheduler.disarm();
        if self.config.clear_display_on_user_disconnect {
            self.reset_all(now, presenter);
        } else {
            self.registry.clear();
            self.stats.reset(now);
        }
        self.set_state(ConnectionState::Disconnected, now, presenter);
    }

    // ── Event path ────────────────────────────────────────────────────────

    /// Process one decoded event to completion.
    ///
    /// Classifies it (mutating the registry), folds it into the aggregates,
    /// presents the notification if the transition produced one, then
    /// presents the updated stat labels.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotConnected`] while disconnected; nothing is mutated.
    pub fn handle_event<O: Presenter>(
        &mut self,
        event:     &RideEvent,
        now:       Timestamp,
        presenter: &mut O,
    ) -> SessionResult<Classification> {
        if !self.state.is_connected() {
            return Err(SessionError::NotConnected);
        }

        let classification = self.classifier.classify(&mut self.registry, event);
        self.stats.apply(
            event,
            classification.is_new_ride(),
            classification.previous.as_ref(),
            now,
        );

        if classification.kind == ClassificationKind::Ignored {
            debug!("dropoff for untracked ride {}; ignoring", event.id);
        }
        if let Some(notification) = &classification.notification {
            presenter.on_notification(notification);
        }
        presenter.on_stats(&self.stats.snapshot(now));

        Ok(classification)
    }

    // ── Tick path ─────────────────────────────────────────────────────────

    /// Refresh the card window if a tick is due.  `None` when not due or
    /// disconnected.
    pub fn poll_tick<O: Presenter>(&mut self, now: Timestamp, presenter: &mut O) -> Option<usize> {
        self.scheduler.poll(&self.registry, presenter, now)
    }

    /// Refresh the card window immediately.  Returns the number of slots
    /// refreshed (0 while disconnected).
    pub fn tick<O: Presenter>(&mut self, now: Timestamp, presenter: &mut O) -> usize {
        self.scheduler.tick(&self.registry, presenter, now)
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn connection(&self) -> ConnectionState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn registry(&self) -> &RideRegistry {
        &self.registry
    }

    #[inline]
    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    #[inline]
    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    /// Current aggregates, on demand.
    pub fn snapshot(&self, now: Timestamp) -> StatsSnapshot {
        self.stats.snapshot(now)
    }

    /// `true` when the incremental aggregates agree with a from-scratch sum
    /// of the registry.  O(active rides).
    pub fn check_consistency(&self) -> bool {
        self.stats.consistent_with(&self.registry, FARE_TOLERANCE)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn reset_all<O: Presenter>(&mut self, now: Timestamp, presenter: &mut O) {
        self.stats.reset(now);
        self.registry.clear();
        presenter.on_clear();
        presenter.on_stats(&StatsSnapshot::empty(now));
    }

    fn set_state<O: Presenter>(&mut self, state: ConnectionState, now: Timestamp, presenter: &mut O) {
        info!("session {} -> {}", self.state, state);
        self.state = state;
        presenter.on_connection(state, now);
    }
}
