//! CSV stop-list loader.
//!
//! # CSV format
//!
//! One row per stop, in traversal order.
//!
//! ```csv
//! id,name,lat,lng,status,eta,arrival_time
//! 1,ISBT Kashmiri Gate,28.6674,77.2275,completed,,09:00
//! 2,Raj Ghat,28.6419,77.2506,current,,
//! 3,IG Stadium,28.6304,77.2422,upcoming,4,
//! ```
//!
//! `status`, `eta` and `arrival_time` are optional columns.  A missing or
//! empty `status` means `upcoming`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use bt_core::GeoPoint;

use crate::{Route, RouteError, RouteResult, Stop, StopStatus};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StopRecord {
    id:   u32,
    name: String,
    lat:  f64,
    lng:  f64,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    eta: Option<u32>,
    #[serde(default)]
    arrival_time: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`Route`] from a CSV file.
pub fn load_stops_csv(path: &Path) -> RouteResult<Route> {
    let file = std::fs::File::open(path).map_err(RouteError::Io)?;
    load_stops_reader(file)
}

/// Like [`load_stops_csv`] but accepts any `Read` source.
pub fn load_stops_reader<R: Read>(reader: R) -> RouteResult<Route> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut stops = Vec::new();

    for result in csv_reader.deserialize::<StopRecord>() {
        let row = result.map_err(|e| RouteError::Parse(e.to_string()))?;
        let status = match row.status.as_deref() {
            Some(s) => s.parse::<StopStatus>()?,
            None => StopStatus::Upcoming,
        };

        let mut stop = Stop::new(row.id, row.name, GeoPoint::new(row.lat, row.lng))
            .with_status(status);
        stop.eta = row.eta;
        stop.arrival_time = row.arrival_time.filter(|s| !s.trim().is_empty());
        stops.push(stop);
    }

    Route::new(stops)
}
