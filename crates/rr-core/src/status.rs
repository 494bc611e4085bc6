//! Ride status enum shared by the decoder, classifier, and presenters.
//!
//! The set of statuses is driven by upstream data and is not closed.  The
//! three statuses the core reasons about have named variants; anything else
//! is carried verbatim in [`RideStatus::Other`] and behaves like an
//! in-progress update.

use std::str::FromStr;

/// Where a ride is in its lifecycle, as reported by the latest event.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RideStatus {
    /// Passenger boarded.
    Pickup,
    /// Meter update while the ride is underway.
    #[default]
    Enroute,
    /// Passenger alighted.  The only terminal status.
    Dropoff,
    /// Any other upstream label, kept as received.
    Other(String),
}

impl RideStatus {
    /// `true` for the status that ends a ride.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, RideStatus::Dropoff)
    }

    #[inline]
    pub fn is_pickup(&self) -> bool {
        matches!(self, RideStatus::Pickup)
    }

    /// Label used in CSV columns and log lines.
    pub fn as_str(&self) -> &str {
        match self {
            RideStatus::Pickup   => "pickup",
            RideStatus::Enroute  => "enroute",
            RideStatus::Dropoff  => "dropoff",
            RideStatus::Other(s) => s,
        }
    }

    /// Parse an upstream label.  Never fails: unknown labels become `Other`.
    pub fn parse(label: &str) -> RideStatus {
        let trimmed = label.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "pickup"  => RideStatus::Pickup,
            "enroute" => RideStatus::Enroute,
            "dropoff" => RideStatus::Dropoff,
            _         => RideStatus::Other(trimmed.to_owned()),
        }
    }
}

impl FromStr for RideStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RideStatus::parse(s))
    }
}

impl From<&str> for RideStatus {
    fn from(s: &str) -> Self {
        RideStatus::parse(s)
    }
}

impl std::fmt::Display for RideStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
