//! CSV summary output.
//!
//! The per-tick summary is a header row followed by one row per tick carrying
//! the *cumulative* hit and miss counts:
//!
//! ```text
//! clockTick,hitCount,missCount
//! 0,1,2
//! 1,3,2
//! ```
//!
//! Batch analysis uses the same format with one row per run instead of per tick.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::common::constants::{BATCH_CSV_HEADER, TICK_CSV_HEADER};
use crate::config::Config;
use crate::mm::PageTable;
use crate::sim::analysis::RunOutcome;
use crate::stats::{SimStats, TickSummary};

use super::Reporter;

/// Writes the per-tick summary channel to any [`Write`] sink.
#[derive(Debug)]
pub struct CsvReporter<W: Write> {
    out: W,
}

impl<W: Write> CsvReporter<W> {
    /// Creates a CSV reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl CsvReporter<BufWriter<File>> {
    /// Creates (or truncates) the file at `path` and reports into it.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while creating the file.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> Reporter for CsvReporter<W> {
    fn begin(&mut self, _config: &Config, _table: &PageTable) -> io::Result<()> {
        writeln!(self.out, "{TICK_CSV_HEADER}")
    }

    fn tick_end(&mut self, summary: &TickSummary) -> io::Result<()> {
        writeln!(
            self.out,
            "{},{},{}",
            summary.tick, summary.hits, summary.misses
        )
    }

    fn finish(&mut self, _stats: &SimStats) -> io::Result<()> {
        self.out.flush()
    }
}

/// Writes the batch analysis table: a header and one `run,hitCount,missCount` row per run.
///
/// # Errors
///
/// Returns any I/O error raised by `out`.
pub fn write_batch<W: Write>(mut out: W, runs: &[RunOutcome]) -> io::Result<()> {
    writeln!(out, "{BATCH_CSV_HEADER}")?;
    for run in runs {
        writeln!(out, "{},{},{}", run.run, run.hits, run.misses)?;
    }
    out.flush()
}
