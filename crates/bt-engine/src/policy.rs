//! The `DeparturePolicy` trait — decides when a stationary vehicle leaves.

use bt_core::{SimRng, SimTime};
use bt_route::Route;

use crate::EngineConfig;

/// Read-only view handed to a [`DeparturePolicy`].
pub struct DepartureContext<'a> {
    pub now:           SimTime,
    pub current_index: usize,
    pub route:         &'a Route,
    pub config:        &'a EngineConfig,
}

/// Pluggable dwell-time model.
///
/// Called on every departure decision while the vehicle is stationary and
/// not at its final stop.  Returning `true` starts the next segment.  All
/// randomness must come from `rng` so runs stay reproducible.
pub trait DeparturePolicy {
    fn should_depart(&self, ctx: &DepartureContext<'_>, rng: &mut SimRng) -> bool;
}

/// Departs with probability `config.departure_probability` per decision.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoinFlip;

impl DeparturePolicy for CoinFlip {
    fn should_depart(&self, ctx: &DepartureContext<'_>, rng: &mut SimRng) -> bool {
        rng.gen_bool(ctx.config.departure_probability)
    }
}

/// Never departs on its own; segments start only through the one-shot
/// initial trigger or manual control.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hold;

impl DeparturePolicy for Hold {
    fn should_depart(&self, _ctx: &DepartureContext<'_>, _rng: &mut SimRng) -> bool {
        false
    }
}
