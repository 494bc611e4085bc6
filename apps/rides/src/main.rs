//! rides — drive a ride event stream through isolated live-view sessions.
//!
//! Input is either a replay file (`--input`, NDJSON or CSV by extension,
//! `-` for NDJSON on stdin) or a seeded synthetic feed (`--synthetic N`).
//! Each session owns its own registry, aggregates and card scheduler;
//! `--sessions N` runs N of them over the same stream in parallel.
//!
//! Without `--realtime` the replay runs on event time: each event is
//! processed "at" its own timestamp, so ticks and rates follow the feed
//! and lag is reported as "no data".  With `--realtime` the stream is paced
//! by the wall clock and lag is measured.

mod logger;
mod presenter;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use log::{info, warn};
use rayon::prelude::*;
use structopt::StructOpt;

use rr_core::{RideEvent, SessionConfig, Timestamp};
use rr_feed::{FeedResult, NdjsonFeed, SyntheticConfig, SyntheticFeed, load_path};
use rr_output::{CsvWriter, RecordingPresenter};
use rr_session::{Session, SessionBuilder};

use presenter::AppPresenter;

#[derive(StructOpt)]
#[structopt(name = "rides")]
struct Flags {
    /// Replay file (.csv, otherwise NDJSON).  `-` reads NDJSON from stdin.
    #[structopt(long = "input", parse(from_os_str))]
    input: Option<PathBuf>,

    /// Generate this many synthetic rides instead of reading a file.
    #[structopt(long = "synthetic")]
    synthetic: Option<usize>,

    /// Seed for the synthetic feed.
    #[structopt(long = "seed", default_value = "42")]
    seed: u64,

    /// Fraction of synthetic steps that emit a dropoff for an unknown ride.
    #[structopt(long = "stray-rate", default_value = "0.0")]
    stray_rate: f64,

    /// JSON session config file.  Flags below override its fields.
    #[structopt(long = "config", parse(from_os_str))]
    config: Option<PathBuf>,

    #[structopt(long = "tick-interval-ms")]
    tick_interval_ms: Option<u64>,

    #[structopt(long = "max-displayed")]
    max_displayed: Option<usize>,

    /// Record stats and notifications as CSV under this directory.
    #[structopt(long = "out", parse(from_os_str))]
    out: Option<PathBuf>,

    /// Number of independent sessions fed the same stream.
    #[structopt(long = "sessions", default_value = "1")]
    sessions: usize,

    /// Pace the stream by the wall clock instead of replaying on event time.
    #[structopt(long = "realtime")]
    realtime: bool,
}

/// What one session saw, reported after the stream ends.
struct RunSummary {
    session:       usize,
    events:        u64,
    notifications: u64,
    ticks:         u64,
    cards:         u64,
    active_at_end: usize,
    consistent:    bool,
    labels:        String,
}

fn main() -> Result<()> {
    logger::setup();
    let flags = Flags::from_args();

    let config = load_config(&flags)?;
    info!(
        "config: tick every {} ms, {} cards, clear on user disconnect: {}",
        config.tick_interval_ms, config.max_displayed, config.clear_display_on_user_disconnect
    );
    if flags.sessions == 0 {
        bail!("--sessions must be at least 1");
    }

    let t0 = Instant::now();
    let summaries = match (&flags.input, flags.synthetic) {
        (Some(_), Some(_)) => bail!("pass either --input or --synthetic, not both"),
        (None, None) => bail!("nothing to replay: pass --input <file> or --synthetic <rides>"),
        (Some(path), None) if path.as_os_str() == "-" => {
            if flags.sessions > 1 {
                bail!("--sessions > 1 needs a file or synthetic input, not stdin");
            }
            let stdin = std::io::stdin();
            let mut feed = NdjsonFeed::new(stdin.lock());
            let summary = run_session(0, feed.by_ref(), &config, &flags).context("reading stdin")?;
            info!("{} malformed lines dropped", feed.dropped());
            vec![summary]
        }
        (Some(path), None) => {
            let replay = load_path(path).with_context(|| format!("loading {}", path.display()))?;
            info!(
                "loaded {} events from {} ({} dropped)",
                replay.events.len(),
                path.display(),
                replay.dropped
            );
            fan_out(&replay.events, &config, &flags)?
        }
        (None, Some(rides)) => {
            let mut synth = SyntheticConfig::new(rides, flags.seed, Utc::now());
            synth.stray_dropoff_rate = flags.stray_rate;
            synth.validate().context("--stray-rate")?;
            let events: Vec<RideEvent> = SyntheticFeed::new(synth).collect();
            info!("generated {} events for {rides} rides (seed {})", events.len(), flags.seed);
            fan_out(&events, &config, &flags)?
        }
    };

    println!("Finished in {:.3} s", t0.elapsed().as_secs_f64());
    println!(
        "{:<8} {:>8} {:>8} {:>7} {:>7} {:>7} {:>6}  {}",
        "Session", "Events", "Notes", "Ticks", "Cards", "Active", "OK", "Final stats"
    );
    println!("{}", "-".repeat(72));
    for s in &summaries {
        println!(
            "{:<8} {:>8} {:>8} {:>7} {:>7} {:>7} {:>6}  {}",
            s.session,
            s.events,
            s.notifications,
            s.ticks,
            s.cards,
            s.active_at_end,
            if s.consistent { "yes" } else { "NO" },
            s.labels,
        );
    }

    if summaries.iter().any(|s| !s.consistent) {
        bail!("aggregates drifted from the registry");
    }
    Ok(())
}

fn load_config(flags: &Flags) -> Result<SessionConfig> {
    let mut config = match &flags.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    if let Some(ms) = flags.tick_interval_ms {
        config.tick_interval_ms = ms;
    }
    if let Some(n) = flags.max_displayed {
        config.max_displayed = n;
    }
    config.validate()?;
    Ok(config)
}

/// Run `flags.sessions` isolated sessions over `events` in parallel.
fn fan_out(events: &[RideEvent], config: &SessionConfig, flags: &Flags) -> Result<Vec<RunSummary>> {
    (0..flags.sessions)
        .into_par_iter()
        .map(|i| run_session(i, events.iter().cloned().map(Ok), config, flags))
        .collect()
}

fn recorder_for(session: usize, flags: &Flags) -> Result<Option<RecordingPresenter<CsvWriter>>> {
    let Some(out) = &flags.out else {
        return Ok(None);
    };
    let dir = if flags.sessions > 1 {
        out.join(format!("session-{session}"))
    } else {
        out.clone()
    };
    let writer = CsvWriter::new(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(Some(RecordingPresenter::new(writer)))
}

fn run_session(
    index:  usize,
    events: impl Iterator<Item = FeedResult<RideEvent>>,
    config: &SessionConfig,
    flags:  &Flags,
) -> Result<RunSummary> {
    let mut presenter = AppPresenter::new(index, recorder_for(index, flags)?);
    let mut session = SessionBuilder::new(config.clone()).build()?;

    let mut clock = Clock::new(flags.realtime);
    let mut events = events.peekable();
    let start = match events.peek() {
        Some(Ok(first)) if !flags.realtime => first.timestamp,
        _ => Utc::now(),
    };
    session.connect(start, &mut presenter)?;

    let mut processed = 0u64;
    for event in events {
        // A read failure ends the run; malformed lines never get here.
        let event = event?;
        let now = clock.wait_for(&event, &mut session, &mut presenter);
        session.handle_event(&event, now, &mut presenter)?;
        session.poll_tick(now, &mut presenter);
        processed += 1;
    }

    let end = clock.now();
    session.tick(end, &mut presenter);
    let consistent = session.check_consistency();
    let active_at_end = session.registry().active_count();
    let mut final_stats = session.snapshot(end);
    if !flags.realtime {
        // Replay time has no wall-clock lag to report.
        final_stats.lag_ms = None;
    }
    let labels = final_stats.labels().to_string();
    let ticks = session.scheduler().ticks();
    if !consistent {
        warn!("[s{index}] aggregates disagree with the registry");
    }

    // End of stream behaves like the transport closing.
    session.transport_lost(end, &mut presenter);
    presenter.finish()?;

    Ok(RunSummary {
        session: index,
        events: processed,
        notifications: presenter.notifications(),
        ticks,
        cards: presenter.cards(),
        active_at_end,
        consistent,
        labels,
    })
}

/// Source of "now" for one session.
///
/// In replay mode time is the timestamp of the latest event.  In realtime
/// mode the wall clock is used and events are held back until their offset
/// from the first event has elapsed, with card ticks polled while waiting.
struct Clock {
    realtime:   bool,
    anchor:     Option<(Timestamp, Instant)>,
    event_time: Option<Timestamp>,
}

impl Clock {
    fn new(realtime: bool) -> Self {
        Self { realtime, anchor: None, event_time: None }
    }

    fn now(&self) -> Timestamp {
        match (self.realtime, self.event_time) {
            (false, Some(t)) => t,
            _ => Utc::now(),
        }
    }

    fn wait_for(
        &mut self,
        event:     &RideEvent,
        session:   &mut Session,
        presenter: &mut AppPresenter,
    ) -> Timestamp {
        if !self.realtime {
            // Never run backwards on out-of-order input.
            let t = self.event_time.map_or(event.timestamp, |prev| prev.max(event.timestamp));
            self.event_time = Some(t);
            return t;
        }

        let (first, started) = *self.anchor.get_or_insert((event.timestamp, Instant::now()));
        let offset = (event.timestamp - first).to_std().unwrap_or(Duration::ZERO);
        let target = started + offset;
        let step = Duration::from_millis(session.config().tick_interval_ms);
        loop {
            let now = Instant::now();
            if now >= target {
                break;
            }
            std::thread::sleep((target - now).min(step));
            session.poll_tick(Utc::now(), presenter);
        }
        Utc::now()
    }
}
