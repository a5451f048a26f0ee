//! delhi — the bus-tracker movement engine on a 29-stop Delhi route.
//!
//! Runs one vehicle from IP Power Station to Mehrauli Terminal on engine
//! time (no sleeping), writes a CSV trace, and prints the final stop table.
//!
//! ```text
//! delhi [CONFIG_JSON] [STOPS_CSV]
//! ```
//!
//! `CONFIG_JSON` is a (possibly partial) `EngineConfig`; `STOPS_CSV` replaces
//! the built-in route.  Set `RUST_LOG=debug` to see every timer.

mod route;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use bt_core::time::IST_OFFSET_SECS;
use bt_core::{SimTime, WallClock};
use bt_engine::{CoinFlip, EngineConfig, EngineError, Snapshot};
use bt_output::{CsvWriter, OutputWriter, TraceObserver};
use bt_route::{Stop, load_stops_csv};
use bt_sim::{SimBuilder, SimObserver};

use route::{START_INDEX, delhi_route};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:          u64  = 42;
/// 2024-01-01 09:30 IST.
const START_UNIX_MS: i64  = 1_704_081_600_000;
/// Engine time after which the run is abandoned.
const LIMIT_MS:      u64  = 6 * 3_600_000;
/// Write every 60th frame (~1 s of engine time at 16 ms frames).
const SAMPLE_EVERY:  u64  = 60;
const OUTPUT_DIR:    &str = "output/delhi";

// ── Observer wrapper to count events ─────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:      TraceObserver<W>,
    snapshots:  usize,
    segments:   usize,
    arrivals:   usize,
    refreshes:  usize,
    errors:     usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: TraceObserver<W>) -> Self {
        Self { inner, snapshots: 0, segments: 0, arrivals: 0, refreshes: 0, errors: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.snapshots += 1;
        self.inner.on_snapshot(snapshot);
    }

    fn on_segment_start(&mut self, at: SimTime, from_index: usize, duration_ms: u64) {
        self.segments += 1;
        self.inner.on_segment_start(at, from_index, duration_ms);
    }

    fn on_arrival(&mut self, at: SimTime, index: usize, stop: &Stop) {
        self.arrivals += 1;
        self.inner.on_arrival(at, index, stop);
    }

    fn on_eta_refresh(&mut self, at: SimTime, refreshed: usize) {
        self.refreshes += 1;
        self.inner.on_eta_refresh(at, refreshed);
    }

    fn on_tick_error(&mut self, at: SimTime, error: &EngineError) {
        self.errors += 1;
        self.inner.on_tick_error(at, error);
    }

    fn on_dispose(&mut self, at: SimTime) {
        self.inner.on_dispose(at);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== delhi — bus-tracker movement engine ===");
    println!("Seed: {SEED}  |  Limit: {} h of engine time", LIMIT_MS / 3_600_000);
    println!();

    let mut args = std::env::args().skip(1);

    // 1. Configuration.
    let config = match args.next() {
        Some(path) => EngineConfig::from_json_file(Path::new(&path))?,
        None => EngineConfig { start_index: Some(START_INDEX), ..Default::default() },
    };
    println!(
        "Config: {:.0} km/h, departure p={}, decisions every {} s, ETA refresh every {} s",
        config.average_speed_kmh,
        config.departure_probability,
        config.decision_interval_ms / 1_000,
        config.eta_refresh_ms / 1_000,
    );

    // 2. Route.
    let route = match args.next() {
        Some(path) => load_stops_csv(Path::new(&path))?,
        None => delhi_route()?,
    };
    println!("Route: {} stops, {:.1} km", route.len(), route.path().length_km());
    println!();

    // 3. Build sim.
    let clock = WallClock::new(START_UNIX_MS, IST_OFFSET_SECS)?;
    let mut sim = SimBuilder::new(route, CoinFlip)
        .config(config)
        .seed(SEED)
        .wall_clock(clock)
        .build()?;

    // 4. Set up output.
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(TraceObserver::new(writer, clock, SAMPLE_EVERY));

    // 5. Run.
    let t0 = Instant::now();
    let completed = sim.run_until_complete(LIMIT_MS, &mut obs)?;
    let elapsed = t0.elapsed();
    let snapshot = sim.snapshot();
    sim.dispose(&mut obs);
    log::info!("trace written to {OUTPUT_DIR}");

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    println!(
        "Run {} at {} ({}) in {:.3} s",
        if completed { "completed" } else { "stopped" },
        sim.now(),
        clock.format_hhmm(sim.now()),
        elapsed.as_secs_f64()
    );
    println!("  segments     : {}", obs.segments);
    println!("  arrivals     : {}", obs.arrivals);
    println!("  ETA refreshes: {}", obs.refreshes);
    println!("  snapshots    : {}", obs.snapshots);
    println!("  tick errors  : {}", obs.errors);
    println!("  positions.csv: {} rows", obs.inner.positions_written());
    println!("  arrivals.csv : {} rows", obs.inner.arrivals_written());

    let json_path = Path::new(OUTPUT_DIR).join("final_snapshot.json");
    std::fs::write(&json_path, serde_json::to_string_pretty(&snapshot)?)?;
    println!("  {}", json_path.display());
    println!();

    // 7. Final stop table.
    println!("{:<4} {:<36} {:<10} {:<8}", "#", "Stop", "Status", "Time");
    println!("{}", "-".repeat(60));
    for stop in &snapshot.stops {
        let time = stop
            .arrival_time
            .as_deref()
            .or(stop.estimated_arrival_time.as_deref())
            .unwrap_or("-");
        println!("{:<4} {:<36} {:<10} {:<8}", stop.id.get(), stop.name, stop.status.as_str(), time);
    }

    Ok(())
}
