//! `rr-classify` — decides what each incoming event means and applies it to
//! the registry.
//!
//! | Event for id …            | Registry effect        | Kind             |
//! |---------------------------|------------------------|------------------|
//! | untracked, non-terminal   | insert (new `Seq`)     | `NewRide`        |
//! | untracked, terminal       | none                   | `Ignored`        |
//! | tracked, terminal         | remove                 | `DropoffNotify`  |
//! | tracked, `pickup`         | replace (new `Seq`)    | `PickupNotify`   |
//! | tracked, anything else    | replace (new `Seq`)    | `Update`         |
//!
//! Whether a transition produces a [`Notification`] is decided by a
//! [`NotificationPolicy`].  The default, [`SilentFirstPickup`], stays quiet
//! on the first sighting of an id even when that first event is a pickup,
//! and notifies on a repeat pickup or a dropoff of a tracked ride.

pub mod classifier;
pub mod notification;
pub mod policy;

#[cfg(test)]
mod tests;

pub use classifier::{Classification, ClassificationKind, EventClassifier};
pub use notification::{Notification, NotificationKind};
pub use policy::{NotificationPolicy, SilentFirstPickup};
