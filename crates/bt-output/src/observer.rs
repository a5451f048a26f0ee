//! `TraceObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use bt_core::{SimTime, WallClock};
use bt_engine::Snapshot;
use bt_route::Stop;
use bt_sim::SimObserver;

use crate::row::{ArrivalRow, PositionRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that records a run to any [`OutputWriter`] backend.
///
/// Every `sample_every`-th snapshot becomes a position row; every arrival
/// becomes an arrival row.  The writer is finished on dispose or by calling
/// [`finish`][Self::finish].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  Check them with [`take_error`][Self::take_error].
pub struct TraceObserver<W: OutputWriter> {
    writer:       W,
    clock:        WallClock,
    sample_every: u64,
    seen:         u64,
    positions:    u64,
    arrivals:     u64,
    last_error:   Option<OutputError>,
}

impl<W: OutputWriter> TraceObserver<W> {
    /// Record through `writer`.  `clock` renders arrival times; a
    /// `sample_every` of 0 is treated as 1.
    pub fn new(writer: W, clock: WallClock, sample_every: u64) -> Self {
        Self {
            writer,
            clock,
            sample_every: sample_every.max(1),
            seen:         0,
            positions:    0,
            arrivals:     0,
            last_error:   None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Position rows written so far.
    pub fn positions_written(&self) -> u64 {
        self.positions
    }

    pub fn arrivals_written(&self) -> u64 {
        self.arrivals
    }

    /// Flush the writer.  Idempotent.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            log::warn!("trace write failed: {e}");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for TraceObserver<W> {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        let sample = self.seen.is_multiple_of(self.sample_every);
        self.seen += 1;
        if !sample {
            return;
        }
        let row = PositionRow {
            at_ms:          snapshot.at.as_millis(),
            stop_index:     snapshot.current_index as u32,
            lat:            snapshot.position.lat,
            lng:            snapshot.position.lng,
            progress:       snapshot.progress,
            eased_progress: snapshot.eased_progress,
            speed_kmh:      snapshot.speed_kmh,
            is_moving:      snapshot.is_moving,
        };
        let result = self.writer.write_position(&row);
        if result.is_ok() {
            self.positions += 1;
        }
        self.store_err(result);
    }

    fn on_arrival(&mut self, at: SimTime, index: usize, stop: &Stop) {
        let row = ArrivalRow {
            at_ms:      at.as_millis(),
            stop_index: index as u32,
            stop_id:    stop.id.get(),
            stop_name:  stop.name.clone(),
            clock:      self.clock.format_hhmm(at),
            final_stop: stop.status == bt_route::StopStatus::Completed,
        };
        let result = self.writer.write_arrival(&row);
        if result.is_ok() {
            self.arrivals += 1;
        }
        self.store_err(result);
    }

    fn on_dispose(&mut self, _at: SimTime) {
        self.finish();
    }
}
