//! Seedable randomness for the movement engine.
//!
//! # Determinism strategy
//!
//! The engine never touches a thread-local or OS RNG.  It owns a `SimRng`
//! handed in at construction, so a fixed seed (together with pinned
//! configuration) reproduces exactly the same segment durations, departure
//! decisions and ETA draws on every run.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Engine-level deterministic RNG.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.  Runs are not reproducible; use in demos only.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// A multiplier drawn uniformly from `[1 - bound, 1 + bound]`.
    ///
    /// Returns exactly `1.0` when `bound` is zero so pinned configurations
    /// produce exact durations.
    pub fn variation_factor(&mut self, bound: f64) -> f64 {
        if bound <= 0.0 {
            return 1.0;
        }
        self.0.gen_range((1.0 - bound)..=(1.0 + bound))
    }
}

impl std::fmt::Debug for SimRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SimRng(..)")
    }
}
