//! Wall-clock time model.
//!
//! # Design
//!
//! Every timestamp is a `chrono::DateTime<Utc>`.  The core never reads the
//! system clock itself: each operation that needs "now" takes it as an
//! argument, so tests drive time explicitly and replays can run faster than
//! real time.
//!
//! [`Period`] is the fixed-interval gate used by the render scheduler: a
//! driver polls `due(now)` between events and fires a tick when it returns
//! `true`.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

use crate::{RrError, RrResult};

/// A point in time, always UTC.
pub type Timestamp = DateTime<Utc>;

/// Parse an upstream ISO-8601 timestamp.
///
/// Accepts RFC 3339 with any offset (`2015-01-04T20:27:07.99995-05:00`) and,
/// as a fallback, offset-less values (`2015-01-04T20:27:07` or with a space
/// separator), which are taken to be UTC.
pub fn parse_timestamp(s: &str) -> RrResult<Timestamp> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    Err(RrError::Parse(format!("invalid timestamp {s:?}: expected ISO-8601")))
}

/// Signed milliseconds from `earlier` to `later`.  Negative when `later`
/// precedes `earlier` (e.g. upstream clock ahead of ours).
#[inline]
pub fn millis_between(later: Timestamp, earlier: Timestamp) -> i64 {
    (later - earlier).num_milliseconds()
}

/// Seconds from `earlier` to `later` as `f64`, clamped at zero.
#[inline]
pub fn secs_since(later: Timestamp, earlier: Timestamp) -> f64 {
    let micros = (later - earlier).num_microseconds().unwrap_or(i64::MAX);
    micros.max(0) as f64 / 1_000_000.0
}

// ── Period ────────────────────────────────────────────────────────────────────

/// A fixed wall-clock interval that can be armed and polled.
///
/// A disarmed period is never due.  Arming resets the phase so the first
/// tick after (re)connect fires one full interval later.
#[derive(Clone, Debug)]
pub struct Period {
    interval: TimeDelta,
    last_fired: Option<Timestamp>,
}

impl Period {
    pub fn from_millis(interval_ms: u64) -> Self {
        let ms = i64::try_from(interval_ms).unwrap_or(i64::MAX);
        Self {
            interval: TimeDelta::try_milliseconds(ms).unwrap_or(TimeDelta::MAX),
            last_fired: None,
        }
    }

    /// Start counting from `now`.
    pub fn arm(&mut self, now: Timestamp) {
        self.last_fired = Some(now);
    }

    /// Stop scheduling until the next [`arm`][Self::arm].
    pub fn disarm(&mut self) {
        self.last_fired = None;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.last_fired.is_some()
    }

    /// `true` when armed and at least one interval has elapsed since the last
    /// firing.
    pub fn due(&self, now: Timestamp) -> bool {
        match self.last_fired {
            None       => false,
            Some(last) => now - last >= self.interval,
        }
    }

    /// Record a firing at `now`.  No effect while disarmed.
    pub fn mark(&mut self, now: Timestamp) {
        if self.last_fired.is_some() {
            self.last_fired = Some(now);
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_armed() { "armed" } else { "disarmed" };
        write!(f, "every {} ms ({state})", self.interval.num_milliseconds())
    }
}
