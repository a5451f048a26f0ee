//! `bt-output` — trace writers for bus-tracker simulation runs.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                    |
//! |-----------|---------|----------------------------------|
//! | *(none)*  | CSV     | `positions.csv`, `arrivals.csv`  |
//! | `sqlite`  | SQLite  | `trace.db`                       |
//!
//! Both implement [`OutputWriter`] and are driven by [`TraceObserver`],
//! which implements `bt_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bt_output::{CsvWriter, TraceObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TraceObserver::new(writer, clock, 10);
//! sim.run_until_complete(3_600_000, &mut obs)?;
//! obs.finish();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{ArrivalRow, PositionRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
