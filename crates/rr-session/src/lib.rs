//! `rr-session` — one client's live view of the ride stream.
//!
//! # Event path and tick path
//!
//! ```text
//! handle_event(event, now):            (every inbound event, in order)
//!   ① Classify  — EventClassifier mutates the RideRegistry.
//!   ② Aggregate — StatsAggregator folds in the transition's deltas.
//!   ③ Present   — notification (pickup/dropoff only), then stat labels.
//!
//! poll_tick(now):                      (independent fixed period)
//!   ④ Sample    — up to `max_displayed` rides, newest first.
//!   ⑤ Present   — one card per ride, slot 0 = most recent.
//! ```
//!
//! Both paths take `&mut Session`, so one event or tick always finishes
//! before the next begins.  Nothing is shared between sessions; run one per
//! connected client.
//!
//! # Connection states
//!
//! | From           | Trigger              | To             | Effect                              |
//! |----------------|----------------------|----------------|-------------------------------------|
//! | Disconnected   | `connect`            | Connected      | reset stats, clear registry + view, arm ticks |
//! | Connected      | `transport_lost`     | Disconnected   | same reset, disarm ticks            |
//! | Connected      | `disconnect` (user)  | Disconnected   | clear state, disarm ticks, view kept unless configured |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rr_session::{NoopPresenter, SessionBuilder};
//!
//! let mut session = SessionBuilder::new(config).build()?;
//! session.connect(now, &mut presenter)?;
//! for event in feed {
//!     session.handle_event(&event, Utc::now(), &mut presenter)?;
//!     session.poll_tick(Utc::now(), &mut presenter);
//! }
//! ```

pub mod builder;
pub mod connection;
pub mod error;
pub mod presenter;
pub mod scheduler;
pub mod session;


pub use builder::SessionBuilder;
pub use connection::ConnectionState;
pub use error::{SessionError, SessionResult};
pub use presenter::{NoopPresenter, Presenter};
pub use scheduler::RenderScheduler;
pub use session::Session;
