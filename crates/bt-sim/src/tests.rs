//! Integration tests for bt-sim.

use bt_core::{GeoPoint, SimTime};
use bt_engine::{CoinFlip, EngineConfig, EngineError, Hold, Snapshot};
use bt_route::{Route, Stop, StopStatus};

use crate::{NoopObserver, SimBuilder, SimError, SimObserver, TimerKind, TimerQueue};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Five stops A–E, ~1.1 km apart.
fn five_stop_route() -> Route {
    let stops = ["A", "B", "C", "D", "E"]
        .iter()
        .enumerate()
        .map(|(i, name)| Stop::new(i as u32 + 1, *name, GeoPoint::new(28.60 - 0.01 * i as f64, 77.20)))
        .collect();
    Route::new(stops).unwrap()
}

/// Start at C, no timing variation, coin never lands.
fn pinned_config() -> EngineConfig {
    EngineConfig {
        start_index:           Some(2),
        variation:             0.0,
        departure_probability: 0.0,
        ..Default::default()
    }
}

/// Records every callback and checks snapshot consistency as it goes.
#[derive(Default)]
struct Recorder {
    snapshots:      usize,
    segment_starts: Vec<(SimTime, usize, u64)>,
    arrivals:       Vec<(SimTime, usize, StopStatus)>,
    refreshes:      Vec<(SimTime, usize)>,
    errors:         usize,
    disposed:       usize,
    last:           Option<Snapshot>,
}

impl SimObserver for Recorder {
    fn on_snapshot(&mut self, snap: &Snapshot) {
        let current = snap.stops.iter().filter(|s| s.status == StopStatus::Current).count();
        assert!(current <= 1, "two current stops at {}", snap.at);
        if !snap.is_moving {
            assert_eq!(snap.position, snap.stops[snap.current_index].location);
            assert_eq!(snap.progress, 0.0);
        }
        if let Some(prev) = &self.last {
            assert!(snap.at >= prev.at);
            assert!(snap.current_index >= prev.current_index);
        }
        self.snapshots += 1;
        self.last = Some(snap.clone());
    }

    fn on_segment_start(&mut self, at: SimTime, from_index: usize, duration_ms: u64) {
        self.segment_starts.push((at, from_index, duration_ms));
    }

    fn on_arrival(&mut self, at: SimTime, index: usize, stop: &Stop) {
        self.arrivals.push((at, index, stop.status));
    }

    fn on_eta_refresh(&mut self, at: SimTime, refreshed: usize) {
        self.refreshes.push((at, refreshed));
    }

    fn on_tick_error(&mut self, _at: SimTime, _error: &EngineError) {
        self.errors += 1;
    }

    fn on_dispose(&mut self, _at: SimTime) {
        self.disposed += 1;
    }
}

// ── TimerQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timer_queue {
    use super::*;

    #[test]
    fn pop_due_returns_earliest_first() {
        let mut q = TimerQueue::new();
        q.push(SimTime(300), TimerKind::Frame);
        q.push(SimTime(100), TimerKind::EtaRefresh);
        q.push(SimTime(200), TimerKind::SegmentDecision);
        q.push(SimTime(900), TimerKind::InitialMovement);
        assert_eq!(q.len(), 4);
        assert_eq!(q.next_due(), Some(SimTime(100)));

        let due = q.pop_due(SimTime(300));
        assert_eq!(
            due,
            vec![
                (SimTime(100), TimerKind::EtaRefresh),
                (SimTime(200), TimerKind::SegmentDecision),
                (SimTime(300), TimerKind::Frame),
            ]
        );
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_due(), Some(SimTime(900)));
    }

    #[test]
    fn same_instant_keeps_push_order() {
        let mut q = TimerQueue::new();
        q.push(SimTime(5), TimerKind::SegmentDecision);
        q.push(SimTime(5), TimerKind::EtaRefresh);
        let kinds: Vec<_> = q.pop_due(SimTime(5)).into_iter().map(|(_, k)| k).collect();
        assert_eq!(kinds, vec![TimerKind::SegmentDecision, TimerKind::EtaRefresh]);
        assert!(q.is_empty());
    }

    #[test]
    fn nothing_due_yet() {
        let mut q = TimerQueue::new();
        q.push(SimTime(10), TimerKind::Frame);
        assert!(q.pop_due(SimTime(9)).is_empty());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn cancel_kind_removes_only_that_kind() {
        let mut q = TimerQueue::new();
        q.push(SimTime(16), TimerKind::Frame);
        q.push(SimTime(16), TimerKind::EtaRefresh);
        q.push(SimTime(32), TimerKind::Frame);
        assert_eq!(q.cancel_kind(TimerKind::Frame), 2);
        assert!(!q.contains(TimerKind::Frame));
        assert!(q.contains(TimerKind::EtaRefresh));
        assert_eq!(q.len(), 1);
        assert_eq!(q.cancel_kind(TimerKind::Frame), 0);
    }

    #[test]
    fn clear_empties() {
        let mut q = TimerQueue::new();
        q.push(SimTime(1), TimerKind::Frame);
        q.push(SimTime(2), TimerKind::Frame);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.next_due(), None);
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn arms_startup_timers() {
        let sim = SimBuilder::new(five_stop_route(), CoinFlip).seed(1).build().unwrap();
        let timers = sim.timers();
        assert_eq!(timers.len(), 3);
        assert!(timers.contains(TimerKind::EtaRefresh));
        assert!(timers.contains(TimerKind::SegmentDecision));
        assert!(timers.contains(TimerKind::InitialMovement));
        assert_eq!(timers.next_due(), Some(SimTime(2_000)));
        assert_eq!(sim.now(), SimTime::ZERO);
        assert_eq!(sim.engine().current_index(), 3);
    }

    #[test]
    fn bad_config_is_rejected() {
        let config = EngineConfig { eta_refresh_ms: 0, ..Default::default() };
        let result = SimBuilder::new(five_stop_route(), CoinFlip).config(config).build();
        assert!(matches!(result, Err(SimError::Engine(EngineError::Config(_)))));
    }

    #[test]
    fn bad_start_index_is_rejected() {
        let config = EngineConfig { start_index: Some(7), ..Default::default() };
        let result = SimBuilder::new(five_stop_route(), Hold).config(config).build();
        assert!(matches!(result, Err(SimError::Engine(EngineError::Route(_)))));
    }
}

// ── Timer loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timer_loop {
    use super::*;

    #[test]
    fn initial_movement_forces_departure() {
        let mut sim = SimBuilder::new(five_stop_route(), CoinFlip)
            .config(pinned_config())
            .seed(1)
            .build()
            .unwrap();
        let mut rec = Recorder::default();

        sim.advance_to(SimTime(1_999), &mut rec).unwrap();
        assert!(!sim.engine().is_moving());

        sim.advance_to(SimTime(2_000), &mut rec).unwrap();
        assert!(sim.engine().is_moving());
        assert!(sim.timers().contains(TimerKind::Frame));
        assert!(!sim.timers().contains(TimerKind::InitialMovement));
        assert_eq!(rec.segment_starts.len(), 1);
        assert_eq!(rec.segment_starts[0].0, SimTime(2_000));
        assert_eq!(rec.segment_starts[0].1, 2);
    }

    #[test]
    fn eta_refresh_fires_on_interval() {
        let mut sim = SimBuilder::new(five_stop_route(), Hold)
            .config(pinned_config())
            .seed(1)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.advance_to(SimTime(15_000), &mut rec).unwrap();
        let times: Vec<_> = rec.refreshes.iter().map(|(at, _)| *at).collect();
        assert_eq!(times, vec![SimTime(5_000), SimTime(10_000), SimTime(15_000)]);
        assert!(rec.refreshes.iter().all(|(_, n)| *n == 2));
        assert_eq!(sim.now(), SimTime(15_000));
    }

    #[test]
    fn frames_move_the_vehicle_then_arrive() {
        let mut sim = SimBuilder::new(five_stop_route(), Hold)
            .config(pinned_config())
            .seed(1)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run_for(2_000, &mut rec).unwrap();
        let (_, _, duration) = rec.segment_starts[0];

        sim.run_for(duration / 2, &mut rec).unwrap();
        let mid = sim.snapshot();
        assert!(mid.is_moving);
        assert!(mid.progress > 0.4 && mid.progress < 0.6);

        sim.run_for(duration, &mut rec).unwrap();
        assert_eq!(rec.arrivals.len(), 1);
        let (at, index, status) = rec.arrivals[0];
        let arrival_at = 2_000 + duration;
        assert!(at.0 >= arrival_at && at.0 < arrival_at + 16);
        assert_eq!(index, 3);
        assert_eq!(status, StopStatus::Current);
        assert!(!sim.engine().is_moving());
        assert!(!sim.timers().contains(TimerKind::Frame));
        assert_eq!(rec.errors, 0);
    }

    #[test]
    fn runs_to_completion() {
        let config = EngineConfig { departure_probability: 1.0, ..pinned_config() };
        let mut sim = SimBuilder::new(five_stop_route(), CoinFlip)
            .config(config)
            .seed(9)
            .build()
            .unwrap();
        let mut rec = Recorder::default();

        assert!(sim.run_until_complete(3_600_000, &mut rec).unwrap());
        assert!(sim.is_complete());
        let indices: Vec<_> = rec.arrivals.iter().map(|(_, i, _)| *i).collect();
        assert_eq!(indices, vec![3, 4]);
        assert_eq!(rec.arrivals[1].2, StopStatus::Completed);
        assert!(sim.timers().is_empty());
        assert_eq!(sim.now(), rec.arrivals[1].0);
        assert!(sim.engine().route().is_complete());
        assert_eq!(rec.errors, 0);

        // Nothing fires after completion.
        let snapshots = rec.snapshots;
        sim.run_for(600_000, &mut rec).unwrap();
        assert_eq!(rec.snapshots, snapshots);
    }

    #[test]
    fn unbounded_limit_saturates() {
        let config = EngineConfig { departure_probability: 1.0, ..pinned_config() };
        let mut sim = SimBuilder::new(five_stop_route(), CoinFlip)
            .config(config)
            .seed(9)
            .build()
            .unwrap();
        let mut rec = Recorder::default();

        assert!(sim.run_until_complete(u64::MAX, &mut rec).unwrap());
        let done_at = sim.now();
        assert!(done_at < SimTime(u64::MAX));
        sim.run_for(u64::MAX, &mut rec).unwrap();
        assert_eq!(sim.now(), SimTime(u64::MAX));
        assert_eq!(rec.arrivals.len(), 2);
    }

    #[test]
    fn deadline_stops_an_unfinished_run() {
        let mut sim = SimBuilder::new(five_stop_route(), Hold)
            .config(pinned_config())
            .seed(1)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        assert!(!sim.run_until_complete(600_000, &mut rec).unwrap());
        assert_eq!(sim.now(), SimTime(600_000));
        assert_eq!(sim.engine().current_index(), 3);
        assert_eq!(rec.segment_starts.len(), 1);
    }

    #[test]
    fn same_seed_same_run() {
        let run = || {
            let config = EngineConfig {
                departure_probability: 0.5,
                variation:             0.2,
                ..pinned_config()
            };
            let mut sim = SimBuilder::new(five_stop_route(), CoinFlip)
                .config(config)
                .seed(77)
                .build()
                .unwrap();
            let mut rec = Recorder::default();
            sim.run_until_complete(36_000_000, &mut rec).unwrap();
            rec.arrivals
        };
        assert_eq!(run(), run());
    }
}

// ── Manual control ────────────────────────────────────────────────────────────

#[cfg(test)]
mod control {
    use super::*;

    fn hold_sim() -> crate::Sim<Hold> {
        SimBuilder::new(five_stop_route(), Hold)
            .config(pinned_config())
            .seed(1)
            .build()
            .unwrap()
    }

    #[test]
    fn manual_start_preempts_initial_movement() {
        let mut sim = hold_sim();
        let mut rec = Recorder::default();
        sim.start_segment().unwrap();
        assert!(sim.timers().contains(TimerKind::Frame));

        sim.advance_to(SimTime(2_000), &mut rec).unwrap();
        assert!(sim.engine().is_moving());
        assert!(rec.segment_starts.is_empty());
        assert_eq!(rec.errors, 0);
    }

    #[test]
    fn pause_stops_frames_and_resume_continues() {
        let mut sim = hold_sim();
        let mut rec = Recorder::default();
        sim.advance_to(SimTime(3_000), &mut rec).unwrap();
        let (_, _, duration) = rec.segment_starts[0];

        sim.pause().unwrap();
        assert!(!sim.timers().contains(TimerKind::Frame));
        let frozen = sim.engine().position();
        sim.advance_to(SimTime(100_000), &mut rec).unwrap();
        assert_eq!(sim.engine().position(), frozen);
        assert!(sim.engine().is_moving());

        sim.resume().unwrap();
        assert!(sim.timers().contains(TimerKind::Frame));
        sim.run_for(duration, &mut rec).unwrap();

        let arrival_at = 2_000 + duration + 97_000;
        let (at, index, _) = rec.arrivals[0];
        assert_eq!(index, 3);
        assert!(at.0 >= arrival_at && at.0 < arrival_at + 16);
    }

    #[test]
    fn reset_rearms_recurring_timers() {
        let config = EngineConfig { departure_probability: 1.0, ..pinned_config() };
        let mut sim = SimBuilder::new(five_stop_route(), CoinFlip)
            .config(config)
            .seed(3)
            .build()
            .unwrap();
        assert!(sim.run_until_complete(3_600_000, &mut NoopObserver).unwrap());

        sim.reset(0).unwrap();
        assert!(!sim.is_complete());
        assert_eq!(sim.engine().current_index(), 0);
        assert!(sim.timers().contains(TimerKind::EtaRefresh));
        assert!(sim.timers().contains(TimerKind::SegmentDecision));
        assert!(sim.run_until_complete(3_600_000, &mut NoopObserver).unwrap());
    }

    #[test]
    fn dispose_tears_everything_down() {
        let mut sim = hold_sim();
        let mut rec = Recorder::default();
        sim.advance_to(SimTime(3_000), &mut rec).unwrap();
        let before = sim.engine().state().clone();

        sim.dispose(&mut rec);
        sim.dispose(&mut rec);
        assert_eq!(rec.disposed, 1);
        assert!(sim.is_disposed());
        assert!(sim.timers().is_empty());

        assert!(matches!(sim.advance_to(SimTime(999_999), &mut rec), Err(SimError::Disposed)));
        assert!(matches!(sim.run_until_complete(1, &mut rec), Err(SimError::Disposed)));
        assert!(matches!(sim.pause(), Err(SimError::Disposed)));
        assert!(matches!(sim.start_segment(), Err(SimError::Disposed)));
        assert_eq!(sim.engine().state(), &before);
        assert_eq!(sim.now(), SimTime(3_000));
    }
}
