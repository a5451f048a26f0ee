//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `trace.db` file in the configured output directory with
//! two tables: `positions` and `arrivals`.  Positions are buffered and
//! inserted in one transaction per batch.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{ArrivalRow, OutputResult, PositionRow};

/// Positions buffered before a transaction is committed.
const BATCH_SIZE: usize = 1_024;

/// Writes a trace to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    pending:  Vec<PositionRow>,
    finished: bool,
}

impl SqliteWriter {
    /// Create `dir` if needed, open (or create) `trace.db`, and initialise
    /// the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("trace.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS positions (
                 at_ms          INTEGER NOT NULL,
                 stop_index     INTEGER NOT NULL,
                 lat            REAL    NOT NULL,
                 lng            REAL    NOT NULL,
                 progress       REAL    NOT NULL,
                 eased_progress REAL    NOT NULL,
                 speed_kmh      REAL    NOT NULL,
                 is_moving      INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS arrivals (
                 at_ms      INTEGER NOT NULL,
                 stop_index INTEGER NOT NULL,
                 stop_id    INTEGER NOT NULL,
                 stop_name  TEXT    NOT NULL,
                 clock      TEXT    NOT NULL,
                 final_stop INTEGER NOT NULL
             );",
        )?;

        Ok(Self {
            conn,
            pending: Vec::with_capacity(BATCH_SIZE),
            finished: false,
        })
    }

    fn flush_positions(&mut self) -> OutputResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO positions \
                 (at_ms, stop_index, lat, lng, progress, eased_progress, speed_kmh, is_moving) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for row in &self.pending {
                stmt.execute(rusqlite::params![
                    row.at_ms as i64,
                    row.stop_index,
                    row.lat,
                    row.lng,
                    row.progress,
                    row.eased_progress,
                    row.speed_kmh,
                    row.is_moving as i64,
                ])?;
            }
        }
        tx.commit()?;
        self.pending.clear();
        Ok(())
    }
}

impl OutputWriter for SqliteWriter {
    fn write_position(&mut self, row: &PositionRow) -> OutputResult<()> {
        self.pending.push(*row);
        if self.pending.len() >= BATCH_SIZE {
            self.flush_positions()?;
        }
        Ok(())
    }

    fn write_arrival(&mut self, row: &ArrivalRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO arrivals (at_ms, stop_index, stop_id, stop_name, clock, final_stop) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.at_ms as i64,
                row.stop_index,
                row.stop_id,
                row.stop_name,
                row.clock,
                row.final_stop as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.flush_positions()?;
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
