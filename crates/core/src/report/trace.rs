//! Human-readable trace output.
//!
//! Narrates the run line by line: the initial layout, which pages each tick
//! uses, the table after aging, every access and swap, and the table after the
//! tick's swaps. Each page is one fixed-width record (see the `Display` impl
//! of [`Page`](crate::mm::Page)).

use std::io::{self, Write};

use crate::common::ids::PageId;
use crate::config::Config;
use crate::mm::PageTable;
use crate::stats::SimStats;

use super::{AccessOutcome, Reporter, TableStage};

/// Writes the trace channel to any [`Write`] sink.
#[derive(Debug)]
pub struct TraceReporter<W: Write> {
    out: W,
}

impl<W: Write> TraceReporter<W> {
    /// Creates a trace reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TraceReporter<W> {
    fn begin(&mut self, _config: &Config, table: &PageTable) -> io::Result<()> {
        writeln!(self.out, "Virtual memory initialized:")?;
        writeln!(self.out, "{table}")
    }

    fn access_scheduled(&mut self, tick: u64, page: PageId) -> io::Result<()> {
        writeln!(self.out, "Page {page} will be used on clock {tick}.")
    }

    fn table(&mut self, stage: TableStage, tick: u64, table: &PageTable) -> io::Result<()> {
        match stage {
            TableStage::Aged => writeln!(self.out, "Virtual memory after aging on clock {tick}:")?,
            TableStage::Swapped => {
                writeln!(self.out, "Virtual memory after all swaps of clock {tick}:")?;
            }
        }
        writeln!(self.out, "{table}")
    }

    fn access(&mut self, tick: u64, page: PageId, outcome: AccessOutcome) -> io::Result<()> {
        writeln!(self.out, "Attempting to use page {page} on clock number {tick}...")?;
        match outcome {
            AccessOutcome::Hit => Ok(()),
            AccessOutcome::Miss(event) => writeln!(
                self.out,
                "Page {} swapped places with page {}, who was the NFU page.",
                event.target, event.victim
            ),
        }
    }

    fn finish(&mut self, _stats: &SimStats) -> io::Result<()> {
        self.out.flush()
    }
}
