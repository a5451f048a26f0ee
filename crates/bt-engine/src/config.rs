//! Engine configuration.

use std::path::Path;

use bt_core::{BtError, BtResult};
use serde::{Deserialize, Serialize};

/// Every tunable of the movement engine and its timers.
///
/// Typically built with `..Default::default()` in code, or loaded from a
/// (possibly partial) JSON file with [`EngineConfig::from_json_file`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Stop the vehicle starts at.  `None` keeps the statuses the route
    /// already carries (exactly one must be `current`).
    pub start_index: Option<usize>,

    /// Average speed used by the travel-time model.
    pub average_speed_kmh: f64,

    /// Floor on any segment's duration.
    pub min_segment_ms: u64,

    /// Segment durations are scaled by a factor drawn from
    /// `[1 - variation, 1 + variation]`.
    pub variation: f64,

    /// Period of the upcoming-stop ETA refresh.
    pub eta_refresh_ms: u64,

    /// Period of the departure decision while stationary.
    pub decision_interval_ms: u64,

    /// Chance that a departure decision starts a segment.
    pub departure_probability: f64,

    /// Delay after start before the first segment is forced.
    pub initial_delay_ms: u64,

    /// Inclusive range of redrawn ETAs, in minutes.
    pub eta_min_minutes: u32,
    pub eta_max_minutes: u32,

    /// Period of the position callback while moving.
    pub frame_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_index:           Some(3),
            average_speed_kmh:     25.0,
            min_segment_ms:        3_000,
            variation:             0.2,
            eta_refresh_ms:        5_000,
            decision_interval_ms:  30_000,
            departure_probability: 0.3,
            initial_delay_ms:      2_000,
            eta_min_minutes:       2,
            eta_max_minutes:       9,
            frame_interval_ms:     16,
        }
    }
}

impl EngineConfig {
    /// Check ranges.  Called by `MovementEngine::new`.
    pub fn validate(&self) -> BtResult<()> {
        if !(self.average_speed_kmh.is_finite() && self.average_speed_kmh > 0.0) {
            return Err(config_err(format!(
                "average_speed_kmh must be positive, got {}",
                self.average_speed_kmh
            )));
        }
        if !(0.0..1.0).contains(&self.variation) {
            return Err(config_err(format!("variation must be in [0, 1), got {}", self.variation)));
        }
        if !(0.0..=1.0).contains(&self.departure_probability) {
            return Err(config_err(format!(
                "departure_probability must be in [0, 1], got {}",
                self.departure_probability
            )));
        }
        for (name, value) in [
            ("min_segment_ms", self.min_segment_ms),
            ("eta_refresh_ms", self.eta_refresh_ms),
            ("decision_interval_ms", self.decision_interval_ms),
            ("frame_interval_ms", self.frame_interval_ms),
        ] {
            if value == 0 {
                return Err(config_err(format!("{name} must be greater than zero")));
            }
        }
        if self.eta_min_minutes > self.eta_max_minutes {
            return Err(config_err(format!(
                "eta range {}..={} is empty",
                self.eta_min_minutes, self.eta_max_minutes
            )));
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> BtResult<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| BtError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> BtResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

fn config_err(msg: String) -> BtError {
    BtError::Config(msg)
}
