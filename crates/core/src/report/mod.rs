//! Reporting Sinks.
//!
//! The simulator narrates each run through the [`Reporter`] trait. Sinks pick the
//! events they care about; every method has a no-op default.
//!
//! # Sinks
//!
//! - `TraceReporter`: Human-readable page table dumps and access narration.
//! - `CsvReporter`: One cumulative `clockTick,hitCount,missCount` row per tick.
//! - `NullReporter`: Discards everything.
//!
//! Sinks compose: a pair `(A, B)` forwards every event to `A` then `B`.

/// CSV summary sinks.
pub mod csv;

/// Human-readable trace sink.
pub mod trace;

use std::io;

use crate::common::ids::PageId;
use crate::config::Config;
use crate::mm::PageTable;
use crate::nfu::SwapEvent;
use crate::stats::{SimStats, TickSummary};

pub use self::csv::CsvReporter;
pub use self::trace::TraceReporter;

/// Point in a tick at which the page table is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableStage {
    /// Counters have been aged; no swaps have happened yet.
    Aged,
    /// Every access of the tick has been served.
    Swapped,
}

/// Result of serving one access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The page was already resident.
    Hit,
    /// The page was swapped in, evicting another.
    Miss(SwapEvent),
}

/// Consumer of simulation events.
///
/// Events arrive in tick order. Within a tick the order is: `access_scheduled`
/// for each used page, `table(Aged)`, `access` for each used page, `table(Swapped)`,
/// then `tick_end`.
pub trait Reporter {
    /// Called once before the first tick with the initial table.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the underlying sink.
    fn begin(&mut self, _config: &Config, _table: &PageTable) -> io::Result<()> {
        Ok(())
    }

    /// A page was chosen to be used this tick.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the underlying sink.
    fn access_scheduled(&mut self, _tick: u64, _page: PageId) -> io::Result<()> {
        Ok(())
    }

    /// Snapshot of the page table at `stage` of `tick`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the underlying sink.
    fn table(&mut self, _stage: TableStage, _tick: u64, _table: &PageTable) -> io::Result<()> {
        Ok(())
    }

    /// An access was served.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the underlying sink.
    fn access(&mut self, _tick: u64, _page: PageId, _outcome: AccessOutcome) -> io::Result<()> {
        Ok(())
    }

    /// A tick finished with the given cumulative counts.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the underlying sink.
    fn tick_end(&mut self, _summary: &TickSummary) -> io::Result<()> {
        Ok(())
    }

    /// Called once after the last tick.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the underlying sink, including flush failures.
    fn finish(&mut self, _stats: &SimStats) -> io::Result<()> {
        Ok(())
    }
}

/// Reporter that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn begin(&mut self, config: &Config, table: &PageTable) -> io::Result<()> {
        (**self).begin(config, table)
    }

    fn access_scheduled(&mut self, tick: u64, page: PageId) -> io::Result<()> {
        (**self).access_scheduled(tick, page)
    }

    fn table(&mut self, stage: TableStage, tick: u64, table: &PageTable) -> io::Result<()> {
        (**self).table(stage, tick, table)
    }

    fn access(&mut self, tick: u64, page: PageId, outcome: AccessOutcome) -> io::Result<()> {
        (**self).access(tick, page, outcome)
    }

    fn tick_end(&mut self, summary: &TickSummary) -> io::Result<()> {
        (**self).tick_end(summary)
    }

    fn finish(&mut self, stats: &SimStats) -> io::Result<()> {
        (**self).finish(stats)
    }
}

impl<A: Reporter, B: Reporter> Reporter for (A, B) {
    fn begin(&mut self, config: &Config, table: &PageTable) -> io::Result<()> {
        self.0.begin(config, table)?;
        self.1.begin(config, table)
    }

    fn access_scheduled(&mut self, tick: u64, page: PageId) -> io::Result<()> {
        self.0.access_scheduled(tick, page)?;
        self.1.access_scheduled(tick, page)
    }

    fn table(&mut self, stage: TableStage, tick: u64, table: &PageTable) -> io::Result<()> {
        self.0.table(stage, tick, table)?;
        self.1.table(stage, tick, table)
    }

    fn access(&mut self, tick: u64, page: PageId, outcome: AccessOutcome) -> io::Result<()> {
        self.0.access(tick, page, outcome)?;
        self.1.access(tick, page, outcome)
    }

    fn tick_end(&mut self, summary: &TickSummary) -> io::Result<()> {
        self.0.tick_end(summary)?;
        self.1.tick_end(summary)
    }

    fn finish(&mut self, stats: &SimStats) -> io::Result<()> {
        self.0.finish(stats)?;
        self.1.finish(stats)
    }
}

impl<R: Reporter> Reporter for Option<R> {
    fn begin(&mut self, config: &Config, table: &PageTable) -> io::Result<()> {
        self.as_mut().map_or(Ok(()), |r| r.begin(config, table))
    }

    fn access_scheduled(&mut self, tick: u64, page: PageId) -> io::Result<()> {
        self.as_mut()
            .map_or(Ok(()), |r| r.access_scheduled(tick, page))
    }

    fn table(&mut self, stage: TableStage, tick: u64, table: &PageTable) -> io::Result<()> {
        self.as_mut().map_or(Ok(()), |r| r.table(stage, tick, table))
    }

    fn access(&mut self, tick: u64, page: PageId, outcome: AccessOutcome) -> io::Result<()> {
        self.as_mut().map_or(Ok(()), |r| r.access(tick, page, outcome))
    }

    fn tick_end(&mut self, summary: &TickSummary) -> io::Result<()> {
        self.as_mut().map_or(Ok(()), |r| r.tick_end(summary))
    }

    fn finish(&mut self, stats: &SimStats) -> io::Result<()> {
        self.as_mut().map_or(Ok(()), |r| r.finish(stats))
    }
}
