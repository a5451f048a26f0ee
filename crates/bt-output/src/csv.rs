//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `positions.csv`
//! - `arrivals.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ArrivalRow, OutputResult, PositionRow};

pub const POSITION_HEADERS: [&str; 8] = [
    "at_ms", "stop_index", "lat", "lng", "progress", "eased_progress", "speed_kmh", "is_moving",
];

pub const ARRIVAL_HEADERS: [&str; 6] =
    ["at_ms", "stop_index", "stop_id", "stop_name", "clock", "final_stop"];

/// Writes a trace to two CSV files.
pub struct CsvWriter {
    positions: Writer<File>,
    arrivals:  Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files, and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut positions = Writer::from_path(dir.join("positions.csv"))?;
        positions.write_record(POSITION_HEADERS)?;

        let mut arrivals = Writer::from_path(dir.join("arrivals.csv"))?;
        arrivals.write_record(ARRIVAL_HEADERS)?;

        Ok(Self {
            positions,
            arrivals,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_position(&mut self, row: &PositionRow) -> OutputResult<()> {
        self.positions.write_record(&[
            row.at_ms.to_string(),
            row.stop_index.to_string(),
            format!("{:.6}", row.lat),
            format!("{:.6}", row.lng),
            format!("{:.4}", row.progress),
            format!("{:.4}", row.eased_progress),
            format!("{:.1}", row.speed_kmh),
            (row.is_moving as u8).to_string(),
        ])?;
        Ok(())
    }

    fn write_arrival(&mut self, row: &ArrivalRow) -> OutputResult<()> {
        self.arrivals.write_record(&[
            row.at_ms.to_string(),
            row.stop_index.to_string(),
            row.stop_id.to_string(),
            row.stop_name.clone(),
            row.clock.clone(),
            (row.final_stop as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.positions.flush()?;
        self.arrivals.flush()?;
        Ok(())
    }
}
