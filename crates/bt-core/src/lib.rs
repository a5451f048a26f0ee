//! `bt-core` — foundational types for the bus-tracker movement engine.
//!
//! This crate is a dependency of every other `bt-*` crate.  It has no `bt-*`
//! dependencies and few external ones (`rand`, `thiserror`, `chrono`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `StopId`                                              |
//! | [`geo`]         | `GeoPoint`, haversine distance, `lerp`, easing        |
//! | [`time`]        | `SimTime` (milliseconds), `WallClock`                 |
//! | [`rng`]         | `SimRng` (seedable engine randomness)                 |
//! | [`error`]       | `BtError`, `BtResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{BtError, BtResult};
pub use geo::{GeoPoint, distance_km, ease_in_out_cubic, lerp};
pub use ids::StopId;
pub use rng::SimRng;
pub use time::{SimTime, WallClock};
