//! The `OutputWriter` trait implemented by all backend writers.

use crate::{ArrivalRow, OutputResult, PositionRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are returned here; [`TraceObserver`][crate::TraceObserver] stores
/// them for [`take_error`][crate::TraceObserver::take_error].
pub trait OutputWriter {
    fn write_position(&mut self, row: &PositionRow) -> OutputResult<()>;

    fn write_arrival(&mut self, row: &ArrivalRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
