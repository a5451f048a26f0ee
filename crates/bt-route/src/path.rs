//! Route geometry: waypoints with an explicit stop-to-waypoint mapping.
//!
//! A drawn route usually has many more points than stops.  Rather than
//! recovering "which waypoint is this stop?" at runtime by comparing
//! floating-point coordinates, the mapping is supplied once, up front, as
//! one waypoint index per stop.

use bt_core::{GeoPoint, distance_km};

use crate::{RouteError, RouteResult, Stop};

/// Polyline of waypoints; `stop_waypoints[i]` is the waypoint index of stop `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath {
    waypoints:      Vec<GeoPoint>,
    stop_waypoints: Vec<usize>,
}

impl RoutePath {
    /// Build a path, validating the stop mapping.
    ///
    /// # Errors
    ///
    /// `RouteError::Path` if the mapping is empty, not strictly increasing,
    /// or points past the last waypoint.
    pub fn new(waypoints: Vec<GeoPoint>, stop_waypoints: Vec<usize>) -> RouteResult<Self> {
        if stop_waypoints.is_empty() {
            return Err(RouteError::Path("no stops mapped".into()));
        }
        for pair in stop_waypoints.windows(2) {
            if pair[1] <= pair[0] {
                return Err(RouteError::Path(format!(
                    "stop waypoint indices must strictly increase ({} then {})",
                    pair[0], pair[1]
                )));
            }
        }
        let last = stop_waypoints[stop_waypoints.len() - 1];
        if last >= waypoints.len() {
            return Err(RouteError::Path(format!(
                "stop mapped to waypoint {last} but the path has {} waypoints",
                waypoints.len()
            )));
        }
        Ok(Self { waypoints, stop_waypoints })
    }

    /// One waypoint per stop, straight lines between them.
    pub fn straight(stops: &[Stop]) -> Self {
        Self {
            waypoints:      stops.iter().map(|s| s.location).collect(),
            stop_waypoints: (0..stops.len()).collect(),
        }
    }

    #[inline]
    pub fn waypoints(&self) -> &[GeoPoint] {
        &self.waypoints
    }

    #[inline]
    pub fn stop_count(&self) -> usize {
        self.stop_waypoints.len()
    }

    /// Waypoint index of stop `stop`.
    #[inline]
    pub fn waypoint_of(&self, stop: usize) -> Option<usize> {
        self.stop_waypoints.get(stop).copied()
    }

    /// Waypoints from stop `from` to stop `from + 1`, both ends included.
    pub fn segment(&self, from: usize) -> Option<&[GeoPoint]> {
        let start = self.waypoint_of(from)?;
        let end = self.waypoint_of(from + 1)?;
        Some(&self.waypoints[start..=end])
    }

    /// Waypoints already driven when the vehicle is at stop `at`.
    pub fn travelled(&self, at: usize) -> Option<&[GeoPoint]> {
        let end = self.waypoint_of(at)?;
        Some(&self.waypoints[..=end])
    }

    /// Waypoints still ahead when the vehicle is at stop `at`.
    pub fn remaining(&self, at: usize) -> Option<&[GeoPoint]> {
        let start = self.waypoint_of(at)?;
        Some(&self.waypoints[start..])
    }

    /// Total polyline length in kilometres.
    pub fn length_km(&self) -> f64 {
        polyline_km(&self.waypoints)
    }

    /// Polyline length of the segment leaving stop `from`.
    pub fn segment_length_km(&self, from: usize) -> Option<f64> {
        self.segment(from).map(polyline_km)
    }
}

fn polyline_km(points: &[GeoPoint]) -> f64 {
    points.windows(2).map(|w| distance_km(w[0], w[1])).sum()
}
