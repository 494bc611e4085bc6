//! Replay inputs: NDJSON streams and CSV files.
//!
//! # NDJSON
//!
//! One JSON payload per line (see [`crate::decode`]).  Blank lines are
//! skipped; malformed lines are dropped and counted.  [`NdjsonFeed`] streams
//! lazily so it can sit on top of stdin or a socket.
//!
//! # CSV format
//!
//! One row per event, header required:
//!
//! ```csv
//! ride_id,ride_status,timestamp,latitude,longitude,meter_reading,passenger_count
//! r1,pickup,2015-01-04T20:27:07-05:00,40.7413,-73.9926,0.0,2
//! r1,enroute,2015-01-04T20:27:37-05:00,40.7420,-73.9901,3.25,2
//! r1,dropoff,2015-01-04T20:35:02-05:00,40.7511,-73.9877,9.75,2
//! ```
//!
//! Rows that fail to deserialize or validate are dropped and counted, like
//! malformed NDJSON lines.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;
use serde::Deserialize;

use rr_core::RideEvent;

use crate::decode::{build_event, decode_payload};
use crate::FeedResult;

// ── Replay ────────────────────────────────────────────────────────────────────

/// A fully loaded replay: accepted events in file order plus a drop count.
#[derive(Debug, Default)]
pub struct Replay {
    pub events:  Vec<RideEvent>,
    pub dropped: usize,
}

/// Load a replay file, choosing the format by extension (`.csv` → CSV,
/// anything else → NDJSON).
pub fn load_path(path: &Path) -> FeedResult<Replay> {
    let file = File::open(path)?;
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        load_csv_reader(file)
    } else {
        load_ndjson_reader(BufReader::new(file))
    }
}

/// Load every NDJSON line from `reader`.
pub fn load_ndjson_reader<R: BufRead>(reader: R) -> FeedResult<Replay> {
    let mut feed = NdjsonFeed::new(reader);
    let mut events = Vec::new();
    for event in &mut feed {
        events.push(event?);
    }
    Ok(Replay { events, dropped: feed.dropped() })
}

// ── NDJSON streaming ──────────────────────────────────────────────────────────

/// Lazily decodes one event per line.
///
/// Yields `Err` only for read failures.  Malformed lines, including lines
/// that are not UTF-8, are skipped and counted in [`dropped`][Self::dropped].
pub struct NdjsonFeed<R: BufRead> {
    reader:  R,
    buf:     Vec<u8>,
    line_no: usize,
    dropped: usize,
}

impl<R: BufRead> NdjsonFeed<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: Vec::new(), line_no: 0, dropped: 0 }
    }

    /// Lines dropped so far because they failed to decode.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl<R: BufRead> Iterator for NdjsonFeed<R> {
    type Item = FeedResult<RideEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0)  => return None,
                Ok(_)  => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_no += 1;
            let line = match std::str::from_utf8(&self.buf) {
                Ok(line) => line.trim(),
                Err(e) => {
                    debug!("line {}: dropping non-UTF-8 payload: {e}", self.line_no);
                    self.dropped += 1;
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }
            match decode_payload(line) {
                Ok(event) => return Some(Ok(event)),
                Err(e) => {
                    debug!("line {}: dropping malformed payload: {e}", self.line_no);
                    self.dropped += 1;
                }
            }
        }
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CsvRecord {
    ride_id:         String,
    ride_status:     String,
    timestamp:       String,
    latitude:        f64,
    longitude:       f64,
    meter_reading:   f64,
    passenger_count: f64,
}

/// Load every CSV row from `reader` (header required).
pub fn load_csv_reader<R: Read>(reader: R) -> FeedResult<Replay> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut replay = Replay::default();

    for (i, result) in csv_reader.deserialize::<CsvRecord>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                debug!("row {}: dropping malformed record: {e}", i + 1);
                replay.dropped += 1;
                continue;
            }
        };
        match build_event(
            row.ride_id,
            &row.ride_status,
            &row.timestamp,
            row.latitude,
            row.longitude,
            row.meter_reading,
            row.passenger_count,
        ) {
            Ok(event) => replay.events.push(event),
            Err(e) => {
                debug!("row {}: dropping invalid record: {e}", i + 1);
                replay.dropped += 1;
            }
        }
    }

    Ok(replay)
}
