//! Presenter trait — the outbound side of a session.

use rr_classify::Notification;
use rr_core::{Slot, Timestamp};
use rr_registry::Ride;
use rr_stats::StatsSnapshot;

use crate::ConnectionState;

/// Callbacks invoked by a [`Session`][crate::Session] whenever something
/// visible changes.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — notification logger
///
/// ```rust,ignore
/// struct FlashLogger;
///
/// impl Presenter for FlashLogger {
///     fn on_notification(&mut self, n: &Notification) {
///         log::info!("{n}");
///     }
/// }
/// ```
pub trait Presenter {
    /// The connection state changed.
    fn on_connection(&mut self, _state: ConnectionState, _at: Timestamp) {}

    /// A pickup or dropoff transition worth a transient pop-up.
    fn on_notification(&mut self, _notification: &Notification) {}

    /// Fresh stat labels, pushed after every processed event.
    fn on_stats(&mut self, _snapshot: &StatsSnapshot) {}

    /// Refresh (or create) the card in `slot` with `ride`.
    ///
    /// Called once per selected ride on each scheduler tick.  Slots beyond
    /// the number of active rides are not mentioned and keep whatever they
    /// last showed.
    fn on_card(&mut self, _slot: Slot, _ride: &Ride) {}

    /// Remove every card.  Called on (re)connect and transport loss.
    fn on_clear(&mut self) {}
}

/// A [`Presenter`] that does nothing.  Use when you need to drive a session
/// but don't want output.
pub struct NoopPresenter;

impl Presenter for NoopPresenter {}
