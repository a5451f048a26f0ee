//! Fluent builder for constructing a [`Sim`].

use bt_core::{SimRng, SimTime, WallClock};
use bt_engine::{DeparturePolicy, EngineConfig, MovementEngine};
use bt_route::Route;

use crate::{Sim, SimResult, TimerKind, TimerQueue};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`Route`]: the stops, in traversal order
/// - `P: DeparturePolicy`: e.g. [`bt_engine::CoinFlip`]
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                   |
/// |-------------------|---------------------------|
/// | `.config(c)`      | `EngineConfig::default()` |
/// | `.seed(s)`        | OS entropy                |
/// | `.wall_clock(w)`  | `WallClock::default()`    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(route, CoinFlip)
///     .config(config)
///     .seed(42)
///     .build()?;
/// sim.run_until_complete(3_600_000, &mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: DeparturePolicy> {
    route:      Route,
    policy:     P,
    config:     Option<EngineConfig>,
    seed:       Option<u64>,
    wall_clock: Option<WallClock>,
}

impl<P: DeparturePolicy> SimBuilder<P> {
    pub fn new(route: Route, policy: P) -> Self {
        Self {
            route,
            policy,
            config:     None,
            seed:       None,
            wall_clock: None,
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Fix the RNG seed.  Together with a pinned config this makes a run
    /// fully reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Map engine time onto local wall-clock time for `HH:MM` strings.
    pub fn wall_clock(mut self, clock: WallClock) -> Self {
        self.wall_clock = Some(clock);
        self
    }

    /// Build the engine and arm the start-up timers.
    ///
    /// # Errors
    ///
    /// Whatever [`MovementEngine::new`] rejects: bad configuration or a
    /// malformed route.
    pub fn build(self) -> SimResult<Sim<P>> {
        let config = self.config.unwrap_or_default();
        let rng = match self.seed {
            Some(seed) => SimRng::new(seed),
            None => SimRng::from_entropy(),
        };
        let clock = self.wall_clock.unwrap_or_default();

        let mut timers = TimerQueue::new();
        let start = SimTime::ZERO;
        timers.push(start + config.eta_refresh_ms, TimerKind::EtaRefresh);
        timers.push(start + config.decision_interval_ms, TimerKind::SegmentDecision);
        timers.push(start + config.initial_delay_ms, TimerKind::InitialMovement);

        let engine = MovementEngine::new(self.route, config, self.policy, rng, clock)?;
        log::debug!("sim built with {} pending timers", timers.len());

        Ok(Sim::from_parts(engine, timers))
    }
}
