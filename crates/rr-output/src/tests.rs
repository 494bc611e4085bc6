//! Integration tests for rr-output.

#[cfg(test)]
mod csv_tests {
    use chrono::{TimeDelta, TimeZone, Utc};
    use tempfile::TempDir;

    use rr_classify::NotificationKind;
    use rr_core::Timestamp;

    use crate::csv::CsvWriter;
    use crate::row::{NotificationRow, StatsRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn stats_row(active: u64) -> StatsRow {
        StatsRow {
            taken_at:           t0() + TimeDelta::seconds(active as i64),
            events_processed:   active * 3,
            rate_per_sec:       Some(12.5),
            lag_ms:             Some(40),
            active_rides:       active,
            total_fare:         active as f64 * 4.25,
            total_passengers:   active * 2,
            density:            (active > 0).then_some(2.0),
            fare_per_passenger: None,
        }
    }

    fn note_row(id: &str) -> NotificationRow {
        NotificationRow {
            event_time: t0(),
            kind:       NotificationKind::Dropoff,
            ride_id:    id.to_string(),
            status:     "dropoff".to_string(),
            lat:        40.75,
            lon:        -73.99,
            map_link:   "https://www.google.com/maps/search/?api=1&query=40.750000,-73.990000".into(),
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("stats.csv").exists());
        assert!(dir.path().join("notifications.csv").exists());
    }

    #[test]
    fn csv_creates_missing_dir() {
        let dir = tmp();
        let nested = dir.path().join("a").join("b");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("stats.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("stats.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, [
            "taken_at",
            "events_processed",
            "rate_per_sec",
            "lag_ms",
            "active_rides",
            "total_fare",
            "total_passengers",
            "density",
            "fare_per_passenger",
        ]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("notifications.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["event_time", "kind", "ride_id", "status", "lat", "lon", "map_link"]);
    }

    #[test]
    fn csv_stats_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_stats(&stats_row(0)).unwrap();
        w.write_stats(&stats_row(2)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("stats.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "2024-03-01T12:00:00+00:00");
        assert_eq!(&rows[0][7], "", "no density with zero rides");
        assert_eq!(&rows[1][4], "2");
        assert_eq!(&rows[1][5], "8.50");
        assert_eq!(&rows[1][7], "2");
        assert_eq!(&rows[1][8], "");
    }

    #[test]
    fn csv_notification_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_notification(&note_row("r1")).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("notifications.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "dropoff");
        assert_eq!(&rows[0][2], "r1");
        assert!(rows[0][6].ends_with("query=40.750000,-73.990000"));
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod recording_tests {
    use chrono::{TimeDelta, TimeZone, Utc};

    use rr_core::{RideEvent, RideStatus, SessionConfig, Timestamp};
    use rr_session::SessionBuilder;

    use crate::{CsvWriter, NotificationRow, OutputResult, OutputWriter, RecordingPresenter, StatsRow};

    fn at(ms: i64) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() + TimeDelta::milliseconds(ms)
    }

    /// Writer that fails every stats write.
    #[derive(Default)]
    struct Failing {
        notes: usize,
    }

    impl OutputWriter for Failing {
        fn write_stats(&mut self, _row: &StatsRow) -> OutputResult<()> {
            Err(std::io::Error::other("disk full").into())
        }

        fn write_notification(&mut self, _row: &NotificationRow) -> OutputResult<()> {
            self.notes += 1;
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn session_output_recorded() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut rec = RecordingPresenter::new(CsvWriter::new(dir.path()).unwrap());
        let mut session = SessionBuilder::new(SessionConfig::default()).build().unwrap();

        session.connect(at(0), &mut rec).unwrap();
        let events = [
            RideEvent::new("r1", RideStatus::Pickup, at(0)).with_passengers(2),
            RideEvent::new("r1", RideStatus::Enroute, at(100)).with_fare(4.0).with_passengers(2),
            RideEvent::new("r1", RideStatus::Dropoff, at(200)).with_fare(9.5).with_passengers(2),
        ];
        for e in &events {
            session.handle_event(e, e.timestamp, &mut rec).unwrap();
        }
        rec.finish();
        assert!(rec.take_error().is_none(), "no write errors expected");

        // One reset snapshot on connect plus one per event.
        assert_eq!(rec.rows_written(), (4, 1));

        let mut rdr = csv::Reader::from_path(dir.path().join("stats.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[2][5], "4.00");
        assert_eq!(&rows[3][4], "0");

        let mut rdr = csv::Reader::from_path(dir.path().join("notifications.csv")).unwrap();
        let notes: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(notes.len(), 1);
        assert_eq!(&notes[0][2], "r1");
    }

    #[test]
    fn first_error_is_kept() {
        let mut rec = RecordingPresenter::new(Failing::default());
        let mut session = SessionBuilder::new(SessionConfig::default()).build().unwrap();
        session.connect(at(0), &mut rec).unwrap();
        session
            .handle_event(&RideEvent::new("r1", RideStatus::Pickup, at(0)), at(0), &mut rec)
            .unwrap();

        assert_eq!(rec.rows_written(), (0, 0));
        assert!(rec.take_error().is_some());
        assert!(rec.take_error().is_none());
        assert_eq!(rec.into_writer().notes, 0);
    }
}
