//! Simulation statistics collection and reporting.
//!
//! This module tracks the outcome of a run. It provides:
//! 1. **Counters:** Ticks run, accesses, hits, misses, and swaps.
//! 2. **Derived metrics:** Hit and miss rates plus accesses per tick.
//! 3. **Tick summaries:** The cumulative `(tick, hits, misses)` triple written to the CSV channel.
//! 4. **Printing:** A sectioned text report for the end of a CLI run.

use std::time::Instant;

/// Cumulative counts at the end of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickSummary {
    /// Zero-based tick index.
    pub tick: u64,
    /// Hits since the start of the run.
    pub hits: u64,
    /// Misses since the start of the run.
    pub misses: u64,
}

/// Simulation statistics structure.
///
/// Hit and miss counts are cumulative over the whole run.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Number of ticks completed.
    pub ticks: u64,
    /// Accesses that found the page resident.
    pub hits: u64,
    /// Accesses that found the page swapped out.
    pub misses: u64,
    /// Pages evicted to make room; equal to `misses` under NFU.
    pub evictions: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            ticks: 0,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"paging"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "paging"];

impl SimStats {
    /// Total number of accesses (hits plus misses).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, in `0.0..=1.0`; zero when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fraction of accesses that missed; zero when nothing was accessed.
    pub fn miss_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.misses as f64 / total as f64
        }
    }

    /// Average accesses per tick; zero before the first tick.
    pub fn accesses_per_tick(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.accesses() as f64 / self.ticks as f64
        }
    }

    /// Summary row for the most recently completed tick.
    ///
    /// Returns `None` before the first tick.
    pub const fn last_summary(&self) -> Option<TickSummary> {
        if self.ticks == 0 {
            return None;
        }
        Some(TickSummary {
            tick: self.ticks - 1,
            hits: self.hits,
            misses: self.misses,
        })
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be `"summary"` or `"paging"`. Pass an
    /// empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();

        println!("\n==========================================================");
        println!("NFU PAGE REPLACEMENT STATISTICS");
        println!("==========================================================");
        if want("summary") {
            println!("host_seconds             {seconds:.4} s");
            println!("sim_ticks                {}", self.ticks);
            println!("sim_accesses             {}", self.accesses());
            println!("sim_accesses_per_tick    {:.2}", self.accesses_per_tick());
            println!("----------------------------------------------------------");
        }
        if want("paging") {
            let hit_rate = self.hit_rate() * 100.0;
            let miss_rate = self.miss_rate() * 100.0;
            println!("PAGING");
            println!("  hits                   {}", self.hits);
            println!("  misses                 {}", self.misses);
            println!("  evictions              {}", self.evictions);
            println!("  hit_rate               {hit_rate:.2}%");
            println!("  miss_rate              {miss_rate:.2}%");
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
