//! Segment travel-time model and the display speed curve.

use std::f64::consts::PI;

use bt_core::{GeoPoint, SimRng, distance_km};

use crate::EngineConfig;

/// Share of a segment spent accelerating (and, symmetrically, braking).
const RAMP_FRACTION: f64 = 0.2;

/// Peak deviation of the cruising plateau above the average speed.
const PLATEAU_SWING: f64 = 0.1;

/// Undisturbed travel time between two points at `speed_kmh`, in ms.
pub fn distance_duration_ms(from: GeoPoint, to: GeoPoint, speed_kmh: f64) -> f64 {
    distance_km(from, to) / speed_kmh * 3_600.0 * 1_000.0
}

/// Duration of one segment:
///
/// ```text
/// max(min_segment_ms, distance / speed × variation_factor)
/// ```
///
/// The variation factor is drawn once per call from
/// `[1 - variation, 1 + variation]`.
pub fn segment_duration_ms(
    from:   GeoPoint,
    to:     GeoPoint,
    config: &EngineConfig,
    rng:    &mut SimRng,
) -> u64 {
    let factor = rng.variation_factor(config.variation);
    let ms = distance_duration_ms(from, to, config.average_speed_kmh) * factor;
    (ms.round() as u64).max(config.min_segment_ms)
}

/// Speedometer reading for a segment at `raw_progress`.
///
/// A pure function of progress, independent of the segment's real length or
/// duration: linear ramp up over the first 20 %, a sine-shaped plateau around
/// `cruise_kmh` through the middle 60 %, linear ramp down over the last 20 %.
/// Continuous at both joins, zero at both ends.
pub fn display_speed_kmh(raw_progress: f64, cruise_kmh: f64) -> f64 {
    let p = raw_progress.clamp(0.0, 1.0);
    if p < RAMP_FRACTION {
        cruise_kmh * p / RAMP_FRACTION
    } else if p <= 1.0 - RAMP_FRACTION {
        let phase = (p - RAMP_FRACTION) / (1.0 - 2.0 * RAMP_FRACTION);
        cruise_kmh * (1.0 + PLATEAU_SWING * (PI * phase).sin())
    } else {
        cruise_kmh * (1.0 - p) / RAMP_FRACTION
    }
}
