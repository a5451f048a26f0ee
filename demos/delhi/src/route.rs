//! The Delhi demo route: 29 stops from Kashmiri Gate to Mehrauli.
//!
//! The vehicle starts at IP Power Station (index 3).  Earlier stops carry
//! the arrival times they were passed at; later stops carry the timetable
//! ETAs, which the engine redraws on its first refresh.

use bt_core::GeoPoint;
use bt_route::{Route, RouteResult, Stop, StopStatus};

/// `(name, lat, lng)` in traversal order.
const STOPS: [(&str, f64, f64); 29] = [
    ("ISBT Kashmiri Gate",                28.6674, 77.2275),
    ("Raj Ghat",                          28.6419, 77.2506),
    ("IG Stadium",                        28.6304, 77.2422),
    ("IP Power Station",                  28.6158, 77.2838),
    ("IP Depot",                          28.6133, 77.2756),
    ("Yamuna Sports Complex",             28.6089, 77.2689),
    ("Nizamuddin Bridge",                 28.5875, 77.2500),
    ("Sarai Kale Khan ISBT",              28.5789, 77.2581),
    ("Hazrat Nizamuddin Railway Station", 28.5828, 77.2500),
    ("Maharani Bagh",                     28.5631, 77.2464),
    ("Nehru Nagar",                       28.5564, 77.2417),
    ("Srinivaspuri",                      28.5492, 77.2361),
    ("Lajpat Nagar",                      28.5678, 77.2432),
    ("Amar Colony",                       28.5547, 77.2289),
    ("Andrews Ganj",                      28.5433, 77.2194),
    ("South Extension",                   28.5703, 77.2189),
    ("AIIMS",                             28.5672, 77.2100),
    ("Safdarjung Hospital",               28.5633, 77.2056),
    ("Yusuf Sarai",                       28.5494, 77.1989),
    ("Green Park Metro",                  28.5594, 77.2069),
    ("Hauz Khas Metro",                   28.5431, 77.2069),
    ("Malviya Nagar Metro",               28.5289, 77.2056),
    ("IIT Delhi Gate",                    28.5458, 77.1917),
    ("Adchini",                           28.5256, 77.1833),
    ("Khel Gaon Marg",                    28.5147, 77.1792),
    ("JNU New Campus",                    28.5369, 77.1664),
    ("Munirka",                           28.5506, 77.1667),
    ("Qutub Minar",                       28.5244, 77.1855),
    ("Mehrauli Terminal",                 28.5175, 77.1853),
];

pub const START_INDEX: usize = 3;

/// Arrival times of the stops already passed.
const PASSED_AT: [&str; START_INDEX] = ["09:00", "09:12", "09:25"];

/// Timetable: the first upcoming stop is 4 minutes out, then every 3.
const FIRST_ETA_MINUTES: u32 = 4;
const ETA_STEP_MINUTES:  u32 = 3;

/// Timetable clock of the first upcoming stop, in minutes after midnight.
const FIRST_ESTIMATE_MINUTES: u32 = 9 * 60 + 42;

pub fn delhi_route() -> RouteResult<Route> {
    let stops = STOPS
        .iter()
        .enumerate()
        .map(|(i, &(name, lat, lng))| {
            let stop = Stop::new(i as u32 + 1, name, GeoPoint::new(lat, lng));
            if i < START_INDEX {
                stop.with_status(StopStatus::Completed).with_arrival_time(PASSED_AT[i])
            } else if i == START_INDEX {
                stop.with_status(StopStatus::Current)
            } else {
                let step = (i - START_INDEX - 1) as u32 * ETA_STEP_MINUTES;
                let estimate = FIRST_ESTIMATE_MINUTES + step;
                stop.with_eta(FIRST_ETA_MINUTES + step)
                    .with_estimated_arrival_time(format!("{:02}:{:02}", estimate / 60, estimate % 60))
            }
        })
        .collect();
    Route::new(stops)
}
