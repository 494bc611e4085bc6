//! Unit tests for rr-feed.

use chrono::{TimeZone, Utc};

use rr_core::{RideStatus, Timestamp};

fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

// ── JSON decode ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod decode {
    use crate::{decode_or_drop, decode_payload, FeedError};

    use super::*;

    const CAMEL: &str = r#"{
        "identifier": "r1",
        "status": "pickup",
        "timestamp": "2024-03-01T07:00:00-05:00",
        "latitude": 40.75,
        "longitude": "-73.99",
        "meterReading": 0,
        "passengerCount": 2
    }"#;

    #[test]
    fn camel_case_payload() {
        let e = decode_payload(CAMEL).unwrap();
        assert_eq!(e.id.as_str(), "r1");
        assert_eq!(e.status, RideStatus::Pickup);
        assert_eq!(e.timestamp, t0());
        assert_eq!(e.position.lat, 40.75);
        assert_eq!(e.position.lon, -73.99);
        assert_eq!(e.meter_reading, 0.0);
        assert_eq!(e.passenger_count, 2);
    }

    #[test]
    fn snake_case_payload_with_extra_fields() {
        let payload = r#"{"ride_id":"x9","point_idx":17,"ride_status":"enroute",
            "timestamp":"2024-03-01T12:00:00Z","latitude":"40.7","longitude":-74.0,
            "meter_reading":"12.5","meter_increment":0.04,"passenger_count":1}"#;
        let e = decode_payload(payload).unwrap();
        assert_eq!(e.id.as_str(), "x9");
        assert_eq!(e.status, RideStatus::Enroute);
        assert_eq!(e.meter_reading, 12.5);
    }

    #[test]
    fn numeric_identifier_is_stringified() {
        let payload = r#"{"identifier":1,"status":"dropoff","timestamp":"2024-03-01T12:00:00Z",
            "latitude":0,"longitude":0,"meterReading":1,"passengerCount":1}"#;
        assert_eq!(decode_payload(payload).unwrap().id.as_str(), "1");
    }

    #[test]
    fn not_json_is_dropped() {
        assert!(matches!(decode_payload("{not json"), Err(FeedError::Json(_))));
        assert!(decode_or_drop("{not json").is_none());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_lat = CAMEL.replace("40.75", "123.0");
        assert!(matches!(decode_payload(&bad_lat), Err(FeedError::Invalid(_))));

        let bad_count = CAMEL.replace("\"passengerCount\": 2", "\"passengerCount\": 1.5");
        assert!(matches!(decode_payload(&bad_count), Err(FeedError::Invalid(_))));

        let bad_fare = CAMEL.replace("\"meterReading\": 0", "\"meterReading\": -3");
        assert!(matches!(decode_payload(&bad_fare), Err(FeedError::Invalid(_))));

        let bad_num = CAMEL.replace("\"-73.99\"", "\"west\"");
        assert!(decode_payload(&bad_num).is_err());

        let bad_ts = CAMEL.replace("2024-03-01T07:00:00-05:00", "soon");
        assert!(matches!(decode_payload(&bad_ts), Err(FeedError::Core(_))));
    }

    #[test]
    fn missing_field_is_rejected() {
        let payload = r#"{"identifier":"r1","status":"pickup"}"#;
        assert!(decode_or_drop(payload).is_none());
    }
}

// ── Replay ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod replay {
    use std::io::Cursor;

    use crate::{load_csv_reader, load_ndjson_reader, load_path, NdjsonFeed};

    use super::*;

    const NDJSON: &str = "\
{\"identifier\":\"a\",\"status\":\"pickup\",\"timestamp\":\"2024-03-01T12:00:00Z\",\"latitude\":40.7,\"longitude\":-74.0,\"meterReading\":0,\"passengerCount\":1}

garbage line
{\"identifier\":\"a\",\"status\":\"dropoff\",\"timestamp\":\"2024-03-01T12:05:00Z\",\"latitude\":40.7,\"longitude\":-74.0,\"meterReading\":8.5,\"passengerCount\":1}
";

    const CSV: &str = "\
ride_id,ride_status,timestamp,latitude,longitude,meter_reading,passenger_count
r1,pickup,2024-03-01T12:00:00Z,40.7413,-73.9926,0.0,2
r1,enroute,2024-03-01T12:00:30Z,40.7420,-73.9901,3.25,2
r2,pickup,2024-03-01T12:00:31Z,abc,-73.9901,0.0,1
r1,dropoff,2024-03-01T12:08:00Z,40.7511,-73.9877,9.75,2
";

    #[test]
    fn ndjson_skips_blank_and_counts_malformed() {
        let replay = load_ndjson_reader(Cursor::new(NDJSON)).unwrap();
        assert_eq!(replay.events.len(), 2);
        assert_eq!(replay.dropped, 1);
        assert_eq!(replay.events[1].status, RideStatus::Dropoff);
    }

    #[test]
    fn ndjson_feed_is_lazy() {
        let mut feed = NdjsonFeed::new(Cursor::new(NDJSON));
        let first = feed.next().unwrap().unwrap();
        assert_eq!(first.status, RideStatus::Pickup);
        assert_eq!(feed.dropped(), 0);
        let second = feed.next().unwrap().unwrap();
        assert_eq!(second.status, RideStatus::Dropoff);
        assert_eq!(feed.dropped(), 1);
        assert!(feed.next().is_none());
    }

    #[test]
    fn non_utf8_line_is_dropped_not_fatal() {
        let mut input = b"\xff\xfe garbage\n".to_vec();
        input.extend_from_slice(NDJSON.as_bytes());
        let replay = load_ndjson_reader(Cursor::new(input)).unwrap();
        assert_eq!(replay.events.len(), 2);
        assert_eq!(replay.dropped, 2);
    }

    #[test]
    fn read_failure_is_an_error() {
        struct Broken;
        impl std::io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("connection reset"))
            }
        }
        let mut feed = NdjsonFeed::new(std::io::BufReader::new(Broken));
        assert!(matches!(feed.next(), Some(Err(crate::FeedError::Io(_)))));
        assert!(load_ndjson_reader(std::io::BufReader::new(Broken)).is_err());
    }

    #[test]
    fn csv_rows_in_order_with_bad_row_dropped() {
        let replay = load_csv_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(replay.events.len(), 3);
        assert_eq!(replay.dropped, 1);
        assert_eq!(replay.events[0].timestamp, t0());
        assert_eq!(replay.events[1].meter_reading, 3.25);
        assert_eq!(replay.events[2].status, RideStatus::Dropoff);
    }

    #[test]
    fn load_path_dispatches_on_extension() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let csv_path = dir.path().join("rides.csv");
        let json_path = dir.path().join("rides.ndjson");
        std::fs::write(&csv_path, CSV).unwrap();
        std::fs::write(&json_path, NDJSON).unwrap();

        assert_eq!(load_path(&csv_path).unwrap().events.len(), 3);
        assert_eq!(load_path(&json_path).unwrap().events.len(), 2);
        assert!(load_path(&dir.path().join("missing.csv")).is_err());
    }
}

// ── Synthetic feed ────────────────────────────────────────────────────────────

#[cfg(test)]
mod synthetic {
    use std::collections::HashMap;

    use crate::{SyntheticConfig, SyntheticFeed};

    use super::*;

    fn collect(cfg: SyntheticConfig) -> Vec<rr_core::RideEvent> {
        SyntheticFeed::new(cfg).collect()
    }

    #[test]
    fn same_seed_same_stream() {
        let a = collect(SyntheticConfig::new(20, 7, t0()));
        let b = collect(SyntheticConfig::new(20, 7, t0()));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_different_stream() {
        let a = collect(SyntheticConfig::new(20, 7, t0()));
        let b = collect(SyntheticConfig::new(20, 8, t0()));
        assert_ne!(a, b);
    }

    #[test]
    fn every_ride_has_pickup_updates_dropoff() {
        let mut cfg = SyntheticConfig::new(30, 3, t0());
        cfg.concurrent = 5;
        cfg.updates = 1..=3;
        let events = collect(cfg);

        let mut by_ride: HashMap<String, Vec<&rr_core::RideEvent>> = HashMap::new();
        for e in &events {
            by_ride.entry(e.id.to_string()).or_default().push(e);
        }
        assert_eq!(by_ride.len(), 30);
        for (id, evs) in &by_ride {
            assert_eq!(evs.first().unwrap().status, RideStatus::Pickup, "{id}");
            assert_eq!(evs.last().unwrap().status, RideStatus::Dropoff, "{id}");
            let middle = &evs[1..evs.len() - 1];
            assert!((1..=3).contains(&middle.len()), "{id}");
            assert!(middle.iter().all(|e| e.status == RideStatus::Enroute));
            // Meter never decreases within a ride.
            assert!(evs.windows(2).all(|w| w[1].meter_reading >= w[0].meter_reading));
        }
    }

    #[test]
    fn timestamps_advance_by_spacing() {
        let events = collect(SyntheticConfig::new(3, 1, t0()));
        assert_eq!(events[0].timestamp, t0());
        assert!(events.windows(2).all(|w| (w[1].timestamp - w[0].timestamp).num_milliseconds() == 50));
    }

    #[test]
    fn stray_dropoffs_use_unseen_ids() {
        let mut cfg = SyntheticConfig::new(10, 11, t0());
        cfg.stray_dropoff_rate = 0.3;
        let events = collect(cfg);
        let strays: Vec<_> = events.iter().filter(|e| e.id.as_str().starts_with("stray-")).collect();
        assert!(!strays.is_empty());
        assert!(strays.iter().all(|e| e.status == RideStatus::Dropoff));
    }

    #[test]
    fn high_stray_rate_still_finishes() {
        let mut cfg = SyntheticConfig::new(2, 1, t0());
        cfg.stray_dropoff_rate = 0.99;
        cfg.updates = 1..=1;
        let events: Vec<_> = SyntheticFeed::new(cfg).take(1_000).collect();

        let rides = events.iter().filter(|e| e.id.as_str().starts_with("ride-")).count();
        assert_eq!(rides, 2 * 3);
        assert!(events.len() < 1_000);
        assert!(events.windows(2).all(|w| {
            !(w[0].id.as_str().starts_with("stray-") && w[1].id.as_str().starts_with("stray-"))
        }));
    }

    #[test]
    fn stray_rate_out_of_range_is_rejected() {
        let mut cfg = SyntheticConfig::new(5, 1, t0());
        assert!(cfg.validate().is_ok());
        cfg.stray_dropoff_rate = 1.0;
        assert!(matches!(cfg.validate(), Err(crate::FeedError::Invalid(_))));
        cfg.stray_dropoff_rate = -0.1;
        assert!(cfg.validate().is_err());
        cfg.stray_dropoff_rate = f64::NAN;
        assert!(cfg.validate().is_err());
    }
}
