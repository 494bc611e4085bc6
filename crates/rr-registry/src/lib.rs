//! `rr-registry` — the set of currently active rides.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`ride`]      | `Ride` — latest observed record for one active ride        |
//! | [`registry`]  | `RideRegistry` — id map + sequence-ordered display index   |
//!
//! # Lifecycle
//!
//! An entry is created the first time an identifier is observed, replaced on
//! every later non-terminal event, and removed exactly once on the terminal
//! event.  The registry itself does not interpret statuses; that is the
//! classifier's job.  It only guarantees that the id map and the ordering
//! index always describe the same set of rides.

pub mod registry;
pub mod ride;


pub use registry::RideRegistry;
pub use ride::Ride;
