//! Simulation observer trait for renderers and data collection.

use bt_core::SimTime;
use bt_engine::{EngineError, Snapshot};
use bt_route::Stop;

/// Callbacks invoked by [`Sim`][crate::Sim] as timers fire.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers only ever see fully applied
/// state.
///
/// # Example — arrival printer
///
/// ```rust,ignore
/// struct ArrivalPrinter;
///
/// impl SimObserver for ArrivalPrinter {
///     fn on_arrival(&mut self, at: SimTime, index: usize, stop: &Stop) {
///         println!("{at}: reached #{index} {}", stop.name);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after every state change a renderer would redraw for: each
    /// frame while moving, each arrival, each ETA refresh.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// Called when a segment starts, with its drawn duration.
    fn on_segment_start(&mut self, _at: SimTime, _from_index: usize, _duration_ms: u64) {}

    /// Called once per arrival.  `stop` is the stop just reached; on the
    /// final stop it is already `completed`.
    fn on_arrival(&mut self, _at: SimTime, _index: usize, _stop: &Stop) {}

    /// Called after upcoming-stop ETAs were redrawn.
    fn on_eta_refresh(&mut self, _at: SimTime, _refreshed: usize) {}

    /// Called when an engine call inside a timer failed.  The timer was
    /// skipped and state is unchanged.
    fn on_tick_error(&mut self, _at: SimTime, _error: &EngineError) {}

    /// Called once when the simulation is torn down.
    fn on_dispose(&mut self, _at: SimTime) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
