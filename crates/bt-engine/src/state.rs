//! Movement state owned by the engine.

use bt_core::{GeoPoint, SimTime, ease_in_out_cubic, lerp};

/// One traversal from the stop at `from_index` to the next stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from_index:  usize,
    pub from:        GeoPoint,
    pub to:          GeoPoint,
    pub started_at:  SimTime,
    pub duration_ms: u64,
}

impl Segment {
    /// Linear fraction of the segment's duration elapsed at `now`, in `[0, 1]`.
    ///
    /// Returns `1.0` for a zero-duration segment.
    pub fn raw_progress(&self, now: SimTime) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now.since(self.started_at) as f64;
        (elapsed / self.duration_ms as f64).min(1.0)
    }

    /// Interpolated position for a given raw progress (eased before lerp).
    pub fn position_at(&self, raw_progress: f64) -> GeoPoint {
        lerp(self.from, self.to, ease_in_out_cubic(raw_progress))
    }

    /// When raw progress reaches 1, absent pauses.
    #[inline]
    pub fn arrival_at(&self) -> SimTime {
        self.started_at + self.duration_ms
    }
}

/// Where the vehicle is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Sitting at the current stop between segments.
    Stationary,
    /// Travelling toward the stop after `current_index`.
    Moving(Segment),
    /// Every stop completed.  No further transitions.
    Finished,
}

/// The engine's transient state.
///
/// Only ever replaced wholesale or mutated inside a single engine method, so
/// no caller can observe a half-applied transition.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementState {
    /// Index of the stop the vehicle is at or departing from.
    pub current_index: usize,

    pub phase: Phase,

    /// Live interpolated coordinate.
    pub position: GeoPoint,

    /// Progress of the in-flight segment as of the last tick; `0.0` when not
    /// moving.
    pub raw_progress:   f64,
    pub eased_progress: f64,

    /// Set while paused; the in-flight segment is frozen from this instant.
    pub paused_at: Option<SimTime>,
}

impl MovementState {
    /// Construct a stationary state at the stop `index` located at `position`.
    pub fn stationary(index: usize, position: GeoPoint) -> Self {
        Self {
            current_index:  index,
            phase:          Phase::Stationary,
            position,
            raw_progress:   0.0,
            eased_progress: 0.0,
            paused_at:      None,
        }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        matches!(self.phase, Phase::Moving(_))
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// The in-flight segment, if any.
    pub fn segment(&self) -> Option<&Segment> {
        match &self.phase {
            Phase::Moving(seg) => Some(seg),
            _ => None,
        }
    }
}
