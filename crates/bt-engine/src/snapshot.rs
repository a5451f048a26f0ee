//! The read-only view handed to renderers after every state change.

use bt_core::{GeoPoint, SimTime};
use bt_route::Stop;
use serde::Serialize;

/// Everything a map, list or table view needs to draw one frame.
///
/// Built by [`MovementEngine::snapshot`][crate::MovementEngine::snapshot]
/// from fully applied state only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Engine time the snapshot was taken at.
    pub at: SimTime,

    pub stops:         Vec<Stop>,
    pub current_index: usize,

    /// `None` once the route is complete.
    pub current_stop: Option<Stop>,
    pub next_stop:    Option<Stop>,

    pub position:  GeoPoint,
    pub is_moving: bool,
    pub is_paused: bool,

    /// Linear progress through the current segment; `0.0` when stationary.
    pub progress: f64,

    /// `progress` after the ease-in/ease-out curve.
    pub eased_progress: f64,

    /// Speedometer reading derived from `progress` alone (not true velocity).
    pub speed_kmh: f64,

    /// `at + next_stop.eta`, as local `HH:MM`.
    pub next_arrival_clock: Option<String>,
}

impl Snapshot {
    /// `progress` as a whole percentage, for progress bars.
    pub fn progress_percent(&self) -> u8 {
        (self.progress.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}
