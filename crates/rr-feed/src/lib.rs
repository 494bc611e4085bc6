//! `rr-feed` — the boundary between raw payloads and the core.
//!
//! Everything here runs *before* a session sees an event.  Malformed
//! payloads are dropped and counted here so the core only ever receives
//! fully decoded [`RideEvent`][rr_core::RideEvent]s.
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`decode`]      | One JSON payload → `RideEvent` (with validation)        |
//! | [`replay`]      | NDJSON line streams and CSV files → events              |
//! | [`synthetic`]   | Seeded generator of interleaved pickup/update/dropoff   |
//! | [`error`]       | `FeedError`, `FeedResult<T>`                            |

pub mod decode;
pub mod error;
pub mod replay;
pub mod synthetic;

#[cfg(test)]
mod tests;

pub use decode::{decode_or_drop, decode_payload};
pub use error::{FeedError, FeedResult};
pub use replay::{NdjsonFeed, Replay, load_csv_reader, load_ndjson_reader, load_path};
pub use synthetic::{SyntheticConfig, SyntheticFeed};
