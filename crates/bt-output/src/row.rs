//! Plain data row types written by output backends.

/// The vehicle's position at one sampled snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRow {
    /// Engine time in milliseconds.
    pub at_ms:          u64,
    /// Stop the vehicle is at or departing from.
    pub stop_index:     u32,
    pub lat:            f64,
    pub lng:            f64,
    pub progress:       f64,
    pub eased_progress: f64,
    pub speed_kmh:      f64,
    pub is_moving:      bool,
}

/// One arrival at a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalRow {
    pub at_ms:      u64,
    pub stop_index: u32,
    pub stop_id:    u32,
    pub stop_name:  String,
    /// Local wall-clock time of the arrival, `HH:MM`.
    pub clock:      String,
    /// `true` for the arrival that completed the route.
    pub final_stop: bool,
}
