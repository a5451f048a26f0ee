//! The movement engine: owns the route's statuses and the movement state, and
//! exposes each transition as one method.

use bt_core::{GeoPoint, SimRng, SimTime, WallClock};
use bt_route::Route;

use crate::state::{MovementState, Phase, Segment};
use crate::travel::{display_speed_kmh, segment_duration_ms};
use crate::{
    DepartureContext, DeparturePolicy, EngineConfig, EngineError, EngineResult, Snapshot,
};

/// What a call to [`MovementEngine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Not moving (stationary, paused, or finished); nothing changed.
    Idle,
    /// Still travelling; position updated.
    Moving { raw: f64, eased: f64 },
    /// Reached the stop at `index`, which is now `current`.
    Arrived { index: usize },
    /// Reached the final stop; every stop is now `completed`.
    Completed,
}

/// Single owner of all mutable movement state.
///
/// Every transition is a `&mut self` method that either applies completely
/// or returns an error with nothing changed.
///
/// # Type parameter
///
/// `P` decides when a stationary vehicle departs (see [`DeparturePolicy`]).
pub struct MovementEngine<P: DeparturePolicy> {
    route:    Route,
    state:    MovementState,
    config:   EngineConfig,
    policy:   P,
    rng:      SimRng,
    clock:    WallClock,
    disposed: bool,
}

impl<P: DeparturePolicy> MovementEngine<P> {
    /// Create an engine at `SimTime::ZERO`.
    ///
    /// With `config.start_index = Some(i)` the route's statuses are preset
    /// around stop `i`; with `None` they are validated as supplied and stale
    /// estimates on passed or current stops are dropped.  Either way a route
    /// that arrives with any non-`upcoming` stop must pass
    /// `Route::validate_statuses`.  Upcoming stops without an ETA get one
    /// drawn.
    ///
    /// # Errors
    ///
    /// `Config` for out-of-range settings, `Route` for an out-of-range start
    /// index or malformed statuses (zero or several `current` stops).
    pub fn new(
        mut route: Route,
        config:    EngineConfig,
        policy:    P,
        mut rng:   SimRng,
        clock:     WallClock,
    ) -> EngineResult<Self> {
        config.validate()?;
        let current = match config.start_index {
            Some(index) => {
                // A route that carries statuses must carry well-formed ones,
                // even though the preset replaces them.
                if route.stops().iter().any(|s| !s.is_upcoming()) {
                    route.validate_statuses()?;
                }
                route.preset(index)?;
                index
            }
            None => {
                let index = route.validate_statuses()?;
                route.normalise();
                index
            }
        };

        for stop in route.stops_mut().iter_mut().filter(|s| s.is_upcoming()) {
            let eta = match stop.eta {
                Some(eta) => eta,
                None => {
                    let eta = rng.gen_range(config.eta_min_minutes..=config.eta_max_minutes);
                    stop.eta = Some(eta);
                    eta
                }
            };
            if stop.estimated_arrival_time.is_none() {
                stop.estimated_arrival_time = Some(clock.format_hhmm_after(SimTime::ZERO, eta));
            }
        }

        let position = route.stops()[current].location;
        log::debug!(
            "movement engine ready: {} stops, starting at {} ({})",
            route.len(),
            current,
            route.stops()[current].name
        );

        Ok(Self {
            route,
            state: MovementState::stationary(current, position),
            config,
            policy,
            rng,
            clock,
            disposed: false,
        })
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn route(&self) -> &Route {
        &self.route
    }

    #[inline]
    pub fn state(&self) -> &MovementState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn clock(&self) -> &WallClock {
        &self.clock
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    #[inline]
    pub fn position(&self) -> GeoPoint {
        self.state.position
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.state.is_moving()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// `true` when no segment can ever start again: finished, or stationary
    /// at the last stop.
    pub fn is_terminal(&self) -> bool {
        match self.state.phase {
            Phase::Finished => true,
            Phase::Stationary => self.state.current_index >= self.route.last_index(),
            Phase::Moving(_) => false,
        }
    }

    /// Read-only view for renderers, as of the last transition.
    pub fn snapshot(&self, now: SimTime) -> Snapshot {
        let stops = self.route.stops();
        let next_stop = if self.state.is_finished() {
            None
        } else {
            stops.get(self.state.current_index + 1).cloned()
        };
        let next_arrival_clock = next_stop
            .as_ref()
            .and_then(|s| s.eta)
            .map(|eta| self.clock.format_hhmm_after(now, eta));
        let speed_kmh = if self.state.is_moving() && !self.state.is_paused() {
            display_speed_kmh(self.state.raw_progress, self.config.average_speed_kmh)
        } else {
            0.0
        };

        Snapshot {
            at:             now,
            stops:          stops.to_vec(),
            current_index:  self.state.current_index,
            current_stop:   self.route.current_stop().cloned(),
            next_stop,
            position:       self.state.position,
            is_moving:      self.state.is_moving(),
            is_paused:      self.state.is_paused(),
            progress:       self.state.raw_progress,
            eased_progress: self.state.eased_progress,
            speed_kmh,
            next_arrival_clock,
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Stationary → Moving.  Returns the drawn segment duration in ms.
    ///
    /// # Errors
    ///
    /// `Disposed`, `Paused`, `AlreadyMoving`, or `AtFinalStop` (also when
    /// finished).  State is unchanged on error.
    pub fn start_segment(&mut self, now: SimTime) -> EngineResult<u64> {
        self.ensure_live()?;
        if self.state.is_paused() {
            return Err(EngineError::Paused);
        }
        let index = self.state.current_index;
        match self.state.phase {
            Phase::Moving(_) => return Err(EngineError::AlreadyMoving { index }),
            Phase::Finished => return Err(EngineError::AtFinalStop { index }),
            Phase::Stationary if index >= self.route.last_index() => {
                return Err(EngineError::AtFinalStop { index });
            }
            Phase::Stationary => {}
        }

        let from = self.route.stops()[index].location;
        let to = self.route.stops()[index + 1].location;
        let duration_ms = segment_duration_ms(from, to, &self.config, &mut self.rng);

        self.state.phase = Phase::Moving(Segment {
            from_index: index,
            from,
            to,
            started_at: now,
            duration_ms,
        });
        self.state.position = from;
        self.state.raw_progress = 0.0;
        self.state.eased_progress = 0.0;

        log::debug!(
            "segment {} → {} started at {now}, {duration_ms} ms",
            self.route.stops()[index].name,
            self.route.stops()[index + 1].name
        );
        Ok(duration_ms)
    }

    /// One departure decision.  Returns `true` if a segment started.
    ///
    /// A no-op (returning `false`) while moving, paused, or terminal.
    pub fn decide(&mut self, now: SimTime) -> EngineResult<bool> {
        self.ensure_live()?;
        if self.state.is_moving() || self.state.is_paused() || self.is_terminal() {
            return Ok(false);
        }
        let ctx = DepartureContext {
            now,
            current_index: self.state.current_index,
            route:         &self.route,
            config:        &self.config,
        };
        if !self.policy.should_depart(&ctx, &mut self.rng) {
            return Ok(false);
        }
        self.start_segment(now)?;
        Ok(true)
    }

    /// Advance the in-flight segment to `now`.
    ///
    /// While raw progress is below 1 this only moves the live position.
    /// Once it reaches 1 the arrival is applied.
    pub fn tick(&mut self, now: SimTime) -> EngineResult<TickOutcome> {
        self.ensure_live()?;
        if self.state.is_paused() {
            return Ok(TickOutcome::Idle);
        }
        let Phase::Moving(segment) = self.state.phase else {
            return Ok(TickOutcome::Idle);
        };

        // Progress never runs backwards, even if a caller replays an old `now`.
        let raw = segment.raw_progress(now).max(self.state.raw_progress);
        if raw >= 1.0 {
            return self.arrive(segment, now);
        }

        let eased = bt_core::ease_in_out_cubic(raw);
        self.state.raw_progress = raw;
        self.state.eased_progress = eased;
        self.state.position = segment.position_at(raw);
        Ok(TickOutcome::Moving { raw, eased })
    }

    /// Moving → Stationary (or Finished).
    fn arrive(&mut self, segment: Segment, now: SimTime) -> EngineResult<TickOutcome> {
        let from = segment.from_index;
        let to = from + 1;
        let len = self.route.len();
        debug_assert!(to < len, "arrival at {to} past the last stop of {len}");
        if to >= len {
            return Err(EngineError::PastLastStop { index: to, len });
        }

        let arrival_time = self.clock.format_hhmm(now);
        let is_final = to == len - 1;
        let stops = self.route.stops_mut();
        stops[from].mark_completed(arrival_time.clone());
        if is_final {
            stops[to].mark_completed(arrival_time);
        } else {
            stops[to].mark_current();
        }
        let position = stops[to].location;

        let mut state = MovementState::stationary(to, position);
        if is_final {
            state.phase = Phase::Finished;
        }
        self.state = state;

        debug_assert!(self.route.status_invariant_holds());
        log::info!("arrived at {} ({}/{}) at {now}", self.route.stops()[to].name, to + 1, len);

        if is_final {
            log::info!("route complete");
            Ok(TickOutcome::Completed)
        } else {
            Ok(TickOutcome::Arrived { index: to })
        }
    }

    /// Redraw the ETA of every upcoming stop that has one, and recompute its
    /// estimated arrival clock.  Returns how many stops changed.
    ///
    /// Completed and current stops are never touched.
    pub fn refresh_etas(&mut self, now: SimTime) -> EngineResult<usize> {
        self.ensure_live()?;
        let (lo, hi) = (self.config.eta_min_minutes, self.config.eta_max_minutes);
        let rng = &mut self.rng;
        let clock = &self.clock;

        let mut refreshed = 0;
        for stop in self.route.stops_mut().iter_mut() {
            if !stop.is_upcoming() || stop.eta.is_none() {
                continue;
            }
            let eta = rng.gen_range(lo..=hi);
            stop.eta = Some(eta);
            stop.estimated_arrival_time = Some(clock.format_hhmm_after(now, eta));
            refreshed += 1;
        }
        log::debug!("refreshed {refreshed} ETAs at {now}");
        Ok(refreshed)
    }

    // ── Manual control ────────────────────────────────────────────────────

    /// Freeze the vehicle.  Idempotent.
    pub fn pause(&mut self, now: SimTime) -> EngineResult<()> {
        self.ensure_live()?;
        if self.state.paused_at.is_none() {
            self.state.paused_at = Some(now);
            log::debug!("paused at {now}");
        }
        Ok(())
    }

    /// Unfreeze; an in-flight segment continues from where it was paused.
    pub fn resume(&mut self, now: SimTime) -> EngineResult<()> {
        self.ensure_live()?;
        let Some(paused_at) = self.state.paused_at.take() else {
            return Ok(());
        };
        if let Phase::Moving(segment) = &mut self.state.phase {
            segment.started_at = segment.started_at + now.since(paused_at);
        }
        log::debug!("resumed at {now}");
        Ok(())
    }

    /// Abort any segment and place the vehicle at stop `to_index`.
    ///
    /// The only transition that can lower the current index.  Stops after
    /// `to_index` become upcoming with freshly drawn ETAs.
    pub fn reset(&mut self, to_index: usize, now: SimTime) -> EngineResult<()> {
        self.ensure_live()?;
        self.route.preset(to_index)?;

        let (lo, hi) = (self.config.eta_min_minutes, self.config.eta_max_minutes);
        let rng = &mut self.rng;
        let clock = &self.clock;
        for stop in self.route.stops_mut().iter_mut().filter(|s| s.is_upcoming()) {
            let eta = rng.gen_range(lo..=hi);
            stop.eta = Some(eta);
            stop.estimated_arrival_time = Some(clock.format_hhmm_after(now, eta));
        }

        let position = self.route.stops()[to_index].location;
        self.state = MovementState::stationary(to_index, position);
        log::info!("reset to stop {} ({})", to_index, self.route.stops()[to_index].name);
        Ok(())
    }

    /// Tear the engine down.  Every later transition returns `Disposed` and
    /// the state stays exactly as it was.
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            log::debug!("movement engine disposed");
        }
    }

    fn ensure_live(&self) -> EngineResult<()> {
        if self.disposed {
            Err(EngineError::Disposed)
        } else {
            Ok(())
        }
    }
}
