//! `bt-engine` — the vehicle's movement state machine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                          |
//! |--------------|-------------------------------------------------------------------|
//! | [`config`]   | `EngineConfig` — every tunable, with defaults and validation      |
//! | [`travel`]   | Segment travel-time model and the display speed curve             |
//! | [`policy`]   | `DeparturePolicy` trait, `CoinFlip`, `Hold`                       |
//! | [`state`]    | `MovementState`, `Phase`, `Segment`                               |
//! | [`engine`]   | `MovementEngine<P>` — atomic transitions over route + state       |
//! | [`snapshot`] | `Snapshot` — the read-only view handed to renderers               |
//! | [`error`]    | `EngineError`, `EngineResult<T>`                                  |
//!
//! # Movement model
//!
//! ```text
//!            start_segment / decide          tick (raw < 1)
//!   Stationary ───────────────────▶ Moving ◀──────────────┐
//!        ▲                            │  └────────────────┘
//!        └──────── tick (raw = 1) ────┘   arrive
//! ```
//!
//! 1. A departure decision (policy coin, or the one-shot initial trigger)
//!    starts a segment toward the next stop with a randomised duration.
//! 2. Every frame `tick(now)` maps elapsed time to raw progress, eases it,
//!    and interpolates the live position.
//! 3. When raw progress reaches 1 the arrival is applied in one update:
//!    statuses, index, `is_moving` and position all change together.
//! 4. Arriving at the last stop completes it too; the engine is then
//!    finished and nothing else fires.
//!
//! Upcoming-stop ETAs are redrawn independently by `refresh_etas` and are
//! not derived from segment durations.

pub mod config;
pub mod engine;
pub mod error;
pub mod policy;
pub mod snapshot;
pub mod state;
pub mod travel;


pub use config::EngineConfig;
pub use engine::{MovementEngine, TickOutcome};
pub use error::{EngineError, EngineResult};
pub use policy::{CoinFlip, DepartureContext, DeparturePolicy, Hold};
pub use snapshot::Snapshot;
pub use state::{MovementState, Phase, Segment};
