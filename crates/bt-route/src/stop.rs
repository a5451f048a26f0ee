//! A single stop and its traversal status.

use std::fmt;
use std::str::FromStr;

use bt_core::{GeoPoint, StopId};
use serde::Serialize;

use crate::RouteError;

/// Where a stop sits relative to the vehicle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StopStatus {
    /// The vehicle has already left this stop.
    Completed,
    /// The vehicle is at this stop, or travelling away from it.
    Current,
    /// Not reached yet.
    #[default]
    Upcoming,
}

impl StopStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StopStatus::Completed => "completed",
            StopStatus::Current   => "current",
            StopStatus::Upcoming  => "upcoming",
        }
    }
}

impl fmt::Display for StopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for StopStatus {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "completed"   => Ok(StopStatus::Completed),
            "current"     => Ok(StopStatus::Current),
            "upcoming" | "" => Ok(StopStatus::Upcoming),
            other => Err(RouteError::Parse(format!(
                "invalid status {other:?}: expected \"completed\", \"current\" or \"upcoming\""
            ))),
        }
    }
}

/// One stop on the route.
///
/// `eta` is only meaningful while `status == Upcoming`; `arrival_time` is set
/// when the stop becomes `Completed`.  Both time strings are local `HH:MM`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id:       StopId,
    pub name:     String,
    #[serde(flatten)]
    pub location: GeoPoint,
    pub status:   StopStatus,

    /// Minutes until arrival (speculative, display only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_arrival_time: Option<String>,
}

impl Stop {
    /// An `upcoming` stop with no estimates.
    pub fn new(id: impl Into<StopId>, name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            status: StopStatus::Upcoming,
            eta: None,
            arrival_time: None,
            estimated_arrival_time: None,
        }
    }

    pub fn with_status(mut self, status: StopStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_eta(mut self, minutes: u32) -> Self {
        self.eta = Some(minutes);
        self
    }

    pub fn with_arrival_time(mut self, hhmm: impl Into<String>) -> Self {
        self.arrival_time = Some(hhmm.into());
        self
    }

    pub fn with_estimated_arrival_time(mut self, hhmm: impl Into<String>) -> Self {
        self.estimated_arrival_time = Some(hhmm.into());
        self
    }

    #[inline]
    pub fn is_upcoming(&self) -> bool {
        self.status == StopStatus::Upcoming
    }

    /// Transition to `completed`, recording when the vehicle got here.
    pub fn mark_completed(&mut self, arrival_time: String) {
        self.status = StopStatus::Completed;
        self.eta = None;
        self.estimated_arrival_time = None;
        self.arrival_time = Some(arrival_time);
    }

    /// Transition to `completed` without touching `arrival_time`.
    ///
    /// Used when presetting a route: stops the vehicle passed before the
    /// engine started keep whatever arrival time the route data carried.
    pub fn mark_passed(&mut self) {
        self.status = StopStatus::Completed;
        self.eta = None;
        self.estimated_arrival_time = None;
    }

    /// Transition to `current`; estimates no longer apply.
    pub fn mark_current(&mut self) {
        self.status = StopStatus::Current;
        self.eta = None;
        self.estimated_arrival_time = None;
    }

    /// Transition to `upcoming`, clearing any previous arrival.
    pub fn mark_upcoming(&mut self) {
        self.status = StopStatus::Upcoming;
        self.arrival_time = None;
    }
}
