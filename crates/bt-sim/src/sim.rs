//! The `Sim` struct and its timer loop.

use bt_core::SimTime;
use bt_engine::{DeparturePolicy, EngineError, MovementEngine, Snapshot, TickOutcome};

use crate::{SimError, SimObserver, SimResult, TimerKind, TimerQueue};

/// Drives a [`MovementEngine`] from a queue of timers.
///
/// Four timers feed the engine, all firing in engine time:
///
/// 1. **EtaRefresh** (recurring): redraw upcoming-stop ETAs.
/// 2. **SegmentDecision** (recurring): ask the departure policy whether a
///    stationary vehicle leaves now.
/// 3. **InitialMovement** (one-shot): force the first departure shortly
///    after start, regardless of the policy.
/// 4. **Frame** (recurring while moving): advance the in-flight segment and
///    apply the arrival once it completes.
///
/// An engine error inside a timer is logged and reported through
/// [`SimObserver::on_tick_error`]; that timer is skipped with state unchanged
/// and recurring timers are re-armed as usual.
///
/// Recurring timers stop re-arming once the engine is terminal, and every
/// timer is dropped when the final stop is reached.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: DeparturePolicy> {
    engine:   MovementEngine<P>,
    timers:   TimerQueue,
    now:      SimTime,
    disposed: bool,
}

impl<P: DeparturePolicy> Sim<P> {
    pub(crate) fn from_parts(engine: MovementEngine<P>, timers: TimerQueue) -> Self {
        Self {
            engine,
            timers,
            now: SimTime::ZERO,
            disposed: false,
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    #[inline]
    pub fn engine(&self) -> &MovementEngine<P> {
        &self.engine
    }

    #[inline]
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// `true` once every stop is completed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.engine.is_finished()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot(self.now)
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Fire every timer due at or before `target`, in time order, then set
    /// the clock to `target`.  Time never runs backwards: an earlier
    /// `target` fires nothing.
    pub fn advance_to<O: SimObserver>(&mut self, target: SimTime, observer: &mut O) -> SimResult<()> {
        self.ensure_live()?;
        while let Some(due) = self.timers.next_due() {
            if due > target {
                break;
            }
            for (at, kind) in self.timers.pop_due(due) {
                self.now = at;
                self.fire(kind, observer);
            }
        }
        if target > self.now {
            self.now = target;
        }
        Ok(())
    }

    /// Advance the clock by `ms`.
    pub fn run_for<O: SimObserver>(&mut self, ms: u64, observer: &mut O) -> SimResult<()> {
        self.advance_to(self.now + ms, observer)
    }

    /// Run until the route completes or `limit_ms` of engine time elapse.
    ///
    /// Returns `true` if the route completed.  On completion the clock stops
    /// at the final arrival; otherwise it stops at the deadline.
    pub fn run_until_complete<O: SimObserver>(
        &mut self,
        limit_ms: u64,
        observer: &mut O,
    ) -> SimResult<bool> {
        self.ensure_live()?;
        let deadline = self.now + limit_ms;
        while !self.engine.is_finished() {
            match self.timers.next_due() {
                Some(due) if due <= deadline => self.advance_to(due, observer)?,
                _ => {
                    self.advance_to(deadline, observer)?;
                    break;
                }
            }
        }
        Ok(self.engine.is_finished())
    }

    // ── Manual control ────────────────────────────────────────────────────

    /// Start the next segment now, bypassing the departure policy.
    ///
    /// Frames for the new segment start on the next frame interval.
    pub fn start_segment(&mut self) -> SimResult<u64> {
        self.ensure_live()?;
        let duration_ms = self.engine.start_segment(self.now)?;
        self.arm_frame();
        Ok(duration_ms)
    }

    /// Freeze the vehicle and stop frames until [`resume`](Self::resume).
    pub fn pause(&mut self) -> SimResult<()> {
        self.ensure_live()?;
        self.engine.pause(self.now)?;
        self.timers.cancel_kind(TimerKind::Frame);
        Ok(())
    }

    pub fn resume(&mut self) -> SimResult<()> {
        self.ensure_live()?;
        self.engine.resume(self.now)?;
        if self.engine.is_moving() {
            self.arm_frame();
        }
        Ok(())
    }

    /// Place the vehicle at `to_index` and restart the recurring timers.
    pub fn reset(&mut self, to_index: usize) -> SimResult<()> {
        self.ensure_live()?;
        self.engine.reset(to_index, self.now)?;
        self.timers.clear();
        let config = self.engine.config();
        let (eta, decision) = (config.eta_refresh_ms, config.decision_interval_ms);
        self.timers.push(self.now + eta, TimerKind::EtaRefresh);
        self.timers.push(self.now + decision, TimerKind::SegmentDecision);
        Ok(())
    }

    /// Tear everything down: the engine is disposed and every pending timer
    /// dropped.  Later calls return [`SimError::Disposed`].  Idempotent.
    pub fn dispose<O: SimObserver>(&mut self, observer: &mut O) {
        if self.disposed {
            return;
        }
        self.engine.dispose();
        self.timers.clear();
        self.disposed = true;
        observer.on_dispose(self.now);
        log::info!("simulation disposed at {}", self.now);
    }

    // ── Timer handling ────────────────────────────────────────────────────

    fn fire<O: SimObserver>(&mut self, kind: TimerKind, observer: &mut O) {
        if self.engine.is_finished() {
            return;
        }
        let now = self.now;
        match kind {
            TimerKind::EtaRefresh => {
                match self.engine.refresh_etas(now) {
                    Ok(refreshed) => {
                        observer.on_eta_refresh(now, refreshed);
                        observer.on_snapshot(&self.engine.snapshot(now));
                    }
                    Err(e) => self.report(kind, &e, observer),
                }
                self.rearm(kind, self.engine.config().eta_refresh_ms);
            }

            TimerKind::SegmentDecision => {
                match self.engine.decide(now) {
                    Ok(true) => self.segment_started(observer),
                    Ok(false) => {}
                    Err(e) => self.report(kind, &e, observer),
                }
                self.rearm(kind, self.engine.config().decision_interval_ms);
            }

            TimerKind::InitialMovement => {
                // Already under way (manual start) or not allowed to move.
                if self.engine.is_moving() || self.engine.is_paused() || self.engine.is_terminal() {
                    log::debug!("initial movement skipped at {now}");
                    return;
                }
                match self.engine.start_segment(now) {
                    Ok(_) => self.segment_started(observer),
                    Err(e) => self.report(kind, &e, observer),
                }
            }

            TimerKind::Frame => self.frame(observer),
        }
    }

    fn frame<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.now;
        match self.engine.tick(now) {
            Ok(TickOutcome::Moving { .. }) => {
                observer.on_snapshot(&self.engine.snapshot(now));
                self.arm_frame();
            }
            Ok(TickOutcome::Arrived { index }) => {
                if let Some(stop) = self.engine.route().stop(index) {
                    observer.on_arrival(now, index, stop);
                }
                observer.on_snapshot(&self.engine.snapshot(now));
            }
            Ok(TickOutcome::Completed) => {
                let index = self.engine.current_index();
                if let Some(stop) = self.engine.route().stop(index) {
                    observer.on_arrival(now, index, stop);
                }
                observer.on_snapshot(&self.engine.snapshot(now));
                self.timers.clear();
            }
            // Paused; `resume` re-arms.
            Ok(TickOutcome::Idle) => {}
            Err(e) => {
                self.report(TimerKind::Frame, &e, observer);
                if self.engine.is_moving() && !self.engine.is_paused() {
                    self.arm_frame();
                }
            }
        }
    }

    fn segment_started<O: SimObserver>(&mut self, observer: &mut O) {
        let Some(segment) = self.engine.state().segment().copied() else {
            return;
        };
        observer.on_segment_start(self.now, segment.from_index, segment.duration_ms);
        observer.on_snapshot(&self.engine.snapshot(self.now));
        self.arm_frame();
    }

    /// Replace any pending frame with one a frame interval from now.
    fn arm_frame(&mut self) {
        self.timers.cancel_kind(TimerKind::Frame);
        let at = self.now + self.engine.config().frame_interval_ms;
        self.timers.push(at, TimerKind::Frame);
    }

    fn rearm(&mut self, kind: TimerKind, interval_ms: u64) {
        if !self.engine.is_terminal() {
            self.timers.push(self.now + interval_ms, kind);
        }
    }

    fn report<O: SimObserver>(&self, kind: TimerKind, error: &EngineError, observer: &mut O) {
        log::warn!("{kind:?} timer at {} skipped: {error}", self.now);
        observer.on_tick_error(self.now, error);
    }

    fn ensure_live(&self) -> SimResult<()> {
        if self.disposed {
            Err(SimError::Disposed)
        } else {
            Ok(())
        }
    }
}
