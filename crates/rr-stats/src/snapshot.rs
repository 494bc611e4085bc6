//! Plain snapshot of the aggregates and its display labels.

use rr_core::Timestamp;

/// Label shown for a ratio whose denominator is zero.
pub const NO_DATA: &str = "no data";

/// All aggregates at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub taken_at:           Timestamp,
    pub events_processed:   u64,
    /// Events per second since reset; `None` if no time has elapsed.
    pub rate_per_sec:       Option<f64>,
    /// Processing time minus event time of the latest event.
    pub lag_ms:             Option<i64>,
    pub active_rides:       usize,
    pub total_fare:         f64,
    pub total_passengers:   u64,
    /// Passengers per active ride; `None` with no active rides.
    pub density:            Option<f64>,
    /// Fare per passenger; `None` with no passengers.
    pub fare_per_passenger: Option<f64>,
}

impl StatsSnapshot {
    /// The all-zero snapshot pushed when labels are cleared.
    pub fn empty(now: Timestamp) -> Self {
        Self {
            taken_at:           now,
            events_processed:   0,
            rate_per_sec:       None,
            lag_ms:             None,
            active_rides:       0,
            total_fare:         0.0,
            total_passengers:   0,
            density:            None,
            fare_per_passenger: None,
        }
    }

    /// Human-readable label strings, one per displayed statistic.
    pub fn labels(&self) -> StatLabels {
        StatLabels {
            rate:               opt_label(self.rate_per_sec, |r| format!("{r:.1}/s")),
            lag:                opt_label(self.lag_ms, |ms| format!("{ms} ms")),
            active_rides:       self.active_rides.to_string(),
            total_fare:         format!("${:.2}", self.total_fare),
            total_passengers:   self.total_passengers.to_string(),
            density:            opt_label(self.density, |d| format!("{d:.2}")),
            fare_per_passenger: opt_label(self.fare_per_passenger, |f| format!("${f:.2}")),
        }
    }
}

/// Formatted stat labels as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLabels {
    pub rate:               String,
    pub lag:                String,
    pub active_rides:       String,
    pub total_fare:         String,
    pub total_passengers:   String,
    pub density:            String,
    pub fare_per_passenger: String,
}

impl std::fmt::Display for StatLabels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rate {} | lag {} | active {} | fare {} | passengers {} | density {} | fare/passenger {}",
            self.rate,
            self.lag,
            self.active_rides,
            self.total_fare,
            self.total_passengers,
            self.density,
            self.fare_per_passenger,
        )
    }
}

fn opt_label<T>(value: Option<T>, fmt: impl FnOnce(T) -> String) -> String {
    value.map(fmt).unwrap_or_else(|| NO_DATA.to_owned())
}
