//! JSON payload decoder.
//!
//! # Accepted shape
//!
//! ```json
//! {
//!   "identifier":     "a3f9…",          // or "ride_id"; string or integer
//!   "status":         "enroute",         // or "ride_status"
//!   "timestamp":      "2015-01-04T20:27:07.99995-05:00",
//!   "latitude":       40.7413,           // number or numeric string
//!   "longitude":      "-73.9926",
//!   "meterReading":   12.5,              // or "meter_reading"
//!   "passengerCount": 2                  // or "passenger_count"
//! }
//! ```
//!
//! Unknown fields are ignored.  A payload that fails to decode or fails
//! validation never reaches the core.

use log::debug;
use serde::Deserialize;

use rr_core::time::parse_timestamp;
use rr_core::{GeoPoint, RideEvent, RideId, RideStatus};

use crate::{FeedError, FeedResult};

// ── Wire record ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WireEvent {
    #[serde(rename = "identifier", alias = "ride_id", alias = "rideId")]
    id:              WireId,
    #[serde(alias = "ride_status")]
    status:          String,
    timestamp:       String,
    latitude:        Numeric,
    longitude:       Numeric,
    #[serde(rename = "meterReading", alias = "meter_reading")]
    meter_reading:   Numeric,
    #[serde(rename = "passengerCount", alias = "passenger_count")]
    passenger_count: Numeric,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Int(u64),
}

/// A number that upstream may send either bare or quoted.
#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Num(f64),
    Text(String),
}

impl Numeric {
    fn as_f64(&self, field: &str) -> FeedResult<f64> {
        let v = match self {
            Numeric::Num(v)  => *v,
            Numeric::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                FeedError::Invalid(format!("{field}: {s:?} is not a number"))
            })?,
        };
        if !v.is_finite() {
            return Err(FeedError::Invalid(format!("{field}: not finite")));
        }
        Ok(v)
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Decode and validate one JSON payload.
pub fn decode_payload(payload: &str) -> FeedResult<RideEvent> {
    let wire: WireEvent = serde_json::from_str(payload)?;
    into_event(wire)
}

/// Boundary filter: decode `payload`, or log and drop it.
pub fn decode_or_drop(payload: &str) -> Option<RideEvent> {
    match decode_payload(payload) {
        Ok(event) => Some(event),
        Err(e) => {
            debug!("dropping malformed payload: {e}");
            None
        }
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

fn into_event(wire: WireEvent) -> FeedResult<RideEvent> {
    let id = match wire.id {
        WireId::Text(s) => s,
        WireId::Int(n)  => n.to_string(),
    };
    build_event(
        id,
        &wire.status,
        &wire.timestamp,
        wire.latitude.as_f64("latitude")?,
        wire.longitude.as_f64("longitude")?,
        wire.meter_reading.as_f64("meterReading")?,
        wire.passenger_count.as_f64("passengerCount")?,
    )
}

/// Shared validation for every input format.
pub(crate) fn build_event(
    id:              String,
    status:          &str,
    timestamp:       &str,
    latitude:        f64,
    longitude:       f64,
    meter_reading:   f64,
    passenger_count: f64,
) -> FeedResult<RideEvent> {
    if id.trim().is_empty() {
        return Err(FeedError::Invalid("empty identifier".into()));
    }
    if status.trim().is_empty() {
        return Err(FeedError::Invalid("empty status".into()));
    }
    let position = GeoPoint::new(latitude, longitude);
    if !position.is_valid() {
        return Err(FeedError::Invalid(format!("position {position} out of range")));
    }
    if !meter_reading.is_finite() || meter_reading < 0.0 {
        return Err(FeedError::Invalid(format!("meter reading {meter_reading} is negative")));
    }
    if passenger_count < 0.0 || passenger_count.fract() != 0.0 || passenger_count > u32::MAX as f64 {
        return Err(FeedError::Invalid(format!(
            "passenger count {passenger_count} is not a non-negative integer"
        )));
    }

    Ok(RideEvent {
        id:              RideId::from(id),
        status:          RideStatus::parse(status),
        timestamp:       parse_timestamp(timestamp)?,
        position,
        meter_reading,
        passenger_count: passenger_count as u32,
    })
}
