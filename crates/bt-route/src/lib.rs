//! `bt-route` — the ordered stop sequence a vehicle traverses.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`stop`]    | `Stop`, `StopStatus`                                       |
//! | [`route`]   | `Route`, `current_index`, `next_stop`                      |
//! | [`path`]    | `RoutePath` — waypoints with an explicit stop mapping      |
//! | [`loader`]  | `load_stops_csv`, `load_stops_reader`                      |
//! | [`error`]   | `RouteError`, `RouteResult<T>`                             |
//!
//! # Status model (summary)
//!
//! ```text
//! index:   0          1          2        3          4
//! status:  completed  completed  current  upcoming   upcoming
//! ```
//!
//! Exactly one stop is `current`, everything before it is `completed` and
//! everything after it is `upcoming`.  The only other legal shape is the
//! terminal one where every stop is `completed`.

pub mod error;
pub mod loader;
pub mod path;
pub mod route;
pub mod stop;


pub use error::{RouteError, RouteResult};
pub use loader::{load_stops_csv, load_stops_reader};
pub use path::RoutePath;
pub use route::{Route, current_index, next_stop};
pub use stop::{Stop, StopStatus};
