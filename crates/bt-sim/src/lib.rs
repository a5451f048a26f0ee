//! `bt-sim` — timer-driven host for the bus-tracker movement engine.
//!
//! # Timer loop
//!
//! ```text
//! advance_to(target):
//!   while next_due <= target:
//!     pop every timer due at next_due, and for each:
//!       EtaRefresh       → refresh_etas;   re-arm +eta_refresh_ms
//!       SegmentDecision  → decide;         re-arm +decision_interval_ms
//!                          (on departure: arm Frame)
//!       InitialMovement  → start_segment;  one-shot (arm Frame)
//!       Frame            → tick;           re-arm +frame_interval_ms while moving
//!                          (on final arrival: drop every timer)
//! ```
//!
//! Everything runs on the caller's thread.  The engine owns all mutable
//! state; observers only ever see fully applied snapshots.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bt_engine::CoinFlip;
//! use bt_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(route, CoinFlip).seed(42).build()?;
//! let completed = sim.run_until_complete(3_600_000, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod timers;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use timers::{TimerKind, TimerQueue};
