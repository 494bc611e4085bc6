//! `rr-core` — foundational types for the `rust_rides` workspace.
//!
//! This crate is a dependency of every other `rr-*` crate.  It intentionally
//! has no `rr-*` dependencies and minimal external ones (`chrono`, `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `RideId`, `Seq`, `Slot`                                 |
//! | [`geo`]       | `GeoPoint`, map-link formatting                         |
//! | [`status`]    | `RideStatus` open enumeration                           |
//! | [`event`]     | `RideEvent` — the decoded inbound record                |
//! | [`time`]      | `Timestamp`, ISO-8601 parsing, `Period`                 |
//! | [`config`]    | `SessionConfig`                                         |
//! | [`rng`]       | `FeedRng` (seeded, for synthetic feeds)                 |
//! | [`error`]     | `RrError`, `RrResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to value types and config.  |

pub mod config;
pub mod error;
pub mod event;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod status;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SessionConfig;
pub use error::{RrError, RrResult};
pub use event::RideEvent;
pub use geo::GeoPoint;
pub use ids::{RideId, Seq, Slot};
pub use rng::FeedRng;
pub use status::RideStatus;
pub use time::{Period, Timestamp};
