//! Simulation time model.
//!
//! # Design
//!
//! Engine time is a monotonically increasing millisecond counter, `SimTime`,
//! measured from engine start.  It is never read from the host clock inside
//! the engine: every transition takes `now` as an argument, so a test can
//! drive a whole segment without sleeping.
//!
//! The mapping to wall-clock time (for the `HH:MM` strings shown next to
//! stops) is held in `WallClock`:
//!
//!   wall_time = start_unix_ms + sim_time_ms   (rendered at utc_offset_secs)

use std::fmt;

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::{BtError, BtResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// Milliseconds elapsed since engine start.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    #[inline]
    pub fn from_secs(secs: u64) -> SimTime {
        SimTime(secs * 1_000)
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        SimTime(self.0.saturating_add(rhs))
    }
}

impl std::ops::Sub for SimTime {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: SimTime) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}s", self.0 / 1_000, self.0 % 1_000)
    }
}

// ── WallClock ─────────────────────────────────────────────────────────────────

/// Converts `SimTime` into local wall-clock strings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallClock {
    /// Unix timestamp (milliseconds) of `SimTime::ZERO`.
    pub start_unix_ms: i64,
    /// Offset from UTC of the displayed local time, in seconds.
    pub utc_offset_secs: i32,
}

/// India Standard Time, +05:30.
pub const IST_OFFSET_SECS: i32 = 5 * 3_600 + 30 * 60;

impl Default for WallClock {
    fn default() -> Self {
        Self {
            start_unix_ms:   1_700_000_000_000,
            utc_offset_secs: IST_OFFSET_SECS,
        }
    }
}

impl WallClock {
    /// Create a clock; fails if `utc_offset_secs` is not a valid offset.
    pub fn new(start_unix_ms: i64, utc_offset_secs: i32) -> BtResult<Self> {
        if FixedOffset::east_opt(utc_offset_secs).is_none() {
            return Err(BtError::Config(format!(
                "UTC offset {utc_offset_secs}s is out of range"
            )));
        }
        Ok(Self { start_unix_ms, utc_offset_secs })
    }

    /// Unix milliseconds corresponding to `t`.
    #[inline]
    pub fn unix_ms(&self, t: SimTime) -> i64 {
        self.start_unix_ms.saturating_add(t.0 as i64)
    }

    /// Local `HH:MM` string for `t`.
    pub fn format_hhmm(&self, t: SimTime) -> String {
        self.local(t).format("%H:%M").to_string()
    }

    /// Local `HH:MM` string for `t` plus `minutes`.
    pub fn format_hhmm_after(&self, t: SimTime, minutes: u32) -> String {
        self.format_hhmm(t + u64::from(minutes) * 60_000)
    }

    fn local(&self, t: SimTime) -> DateTime<FixedOffset> {
        // Fields are public, so an out-of-range offset falls back to UTC.
        let offset = FixedOffset::east_opt(self.utc_offset_secs).unwrap_or(Utc.fix());
        DateTime::from_timestamp_millis(self.unix_ms(t))
            .unwrap_or_default()
            .with_timezone(&offset)
    }
}
