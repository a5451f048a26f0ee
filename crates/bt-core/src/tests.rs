//! Unit tests for bt-core primitives.

#[cfg(test)]
mod ids {
    use crate::StopId;

    #[test]
    fn ordering_follows_inner_value() {
        assert!(StopId(1) < StopId(2));
        assert_eq!(StopId::from(7).get(), 7);
    }

    #[test]
    fn display() {
        assert_eq!(StopId(7).to_string(), "StopId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{GeoPoint, distance_km, ease_in_out_cubic, lerp};

    const KASHMERE_GATE: GeoPoint = GeoPoint { lat: 28.6674, lng: 77.2275 };
    const IG_STADIUM:    GeoPoint = GeoPoint { lat: 28.6304, lng: 77.2422 };

    #[test]
    fn zero_distance() {
        assert_eq!(distance_km(KASHMERE_GATE, KASHMERE_GATE), 0.0);
    }

    #[test]
    fn delhi_scale_distance_matches_reference() {
        // Reference haversine value computed independently with R = 6371 km.
        let d = distance_km(KASHMERE_GATE, IG_STADIUM);
        assert!((d - 4.357_108_7).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = distance_km(KASHMERE_GATE, IG_STADIUM);
        let ba = distance_km(IG_STADIUM, KASHMERE_GATE);
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = GeoPoint::new(30.0, -88.0).distance_km(GeoPoint::new(31.0, -88.0));
        assert!((d - 111.194_93).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let pairs = [
            (KASHMERE_GATE, IG_STADIUM),
            (GeoPoint::new(-33.8688, 151.2093), GeoPoint::new(51.5074, -0.1278)),
            (GeoPoint::new(0.1, 0.2), GeoPoint::new(0.3, 0.7)),
        ];
        for (a, b) in pairs {
            assert_eq!(lerp(a, b, 0.0), a);
            assert_eq!(lerp(a, b, 1.0), b);
        }
    }

    #[test]
    fn lerp_midpoint_and_monotonic() {
        let mid = KASHMERE_GATE.lerp(IG_STADIUM, 0.5);
        assert!((mid.lat - 28.6489).abs() < 1e-9);
        assert!((mid.lng - 77.23485).abs() < 1e-9);

        // Latitude decreases from Kashmere Gate to IG Stadium.
        let mut prev = KASHMERE_GATE.lat;
        for i in 1..=10 {
            let p = lerp(KASHMERE_GATE, IG_STADIUM, i as f64 / 10.0);
            assert!(p.lat <= prev);
            prev = p.lat;
        }
    }

    #[test]
    fn easing_boundaries() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }

    #[test]
    fn easing_is_monotonic_and_symmetric() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let t = i as f64 / 100.0;
            let v = ease_in_out_cubic(t);
            assert!(v >= prev, "not monotonic at t={t}");
            assert!((0.0..=1.0).contains(&v));
            assert!((v + ease_in_out_cubic(1.0 - t) - 1.0).abs() < 1e-12);
            prev = v;
        }
    }

    #[test]
    fn easing_clamps_out_of_range() {
        assert_eq!(ease_in_out_cubic(-0.5), 0.0);
        assert_eq!(ease_in_out_cubic(1.5), 1.0);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimTime, WallClock};
    use crate::time::IST_OFFSET_SECS;

    #[test]
    fn sim_time_arithmetic() {
        let t = SimTime(1_500);
        assert_eq!(t + 500, SimTime(2_000));
        assert_eq!(SimTime(u64::MAX - 1) + 10, SimTime(u64::MAX));
        assert_eq!(SimTime(2_000) - SimTime(500), 1_500);
        assert_eq!(SimTime(100).since(SimTime(300)), 0);
        assert_eq!(SimTime::from_secs(3), SimTime(3_000));
        assert_eq!(SimTime(12_345).to_string(), "12.345s");
    }

    #[test]
    fn wall_clock_formats_local_time() {
        // 2024-01-01T04:00:00Z is 09:30 in IST.
        let clock = WallClock::new(1_704_081_600_000, IST_OFFSET_SECS).unwrap();
        assert_eq!(clock.format_hhmm(SimTime::ZERO), "09:30");
        assert_eq!(clock.format_hhmm(SimTime::from_secs(12 * 60)), "09:42");
        assert_eq!(clock.format_hhmm_after(SimTime::ZERO, 4), "09:34");
    }

    #[test]
    fn wall_clock_rejects_bad_offset() {
        assert!(WallClock::new(0, 100_000).is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..10 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn variation_factor_bounds() {
        let mut rng = SimRng::new(7);
        assert_eq!(rng.variation_factor(0.0), 1.0);
        for _ in 0..1_000 {
            let f = rng.variation_factor(0.2);
            assert!((0.8..=1.2).contains(&f), "got {f}");
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(1);
        assert!(rng.gen_bool(1.0));
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(3.0)); // clamped
    }
}
