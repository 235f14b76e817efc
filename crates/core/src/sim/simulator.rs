//! Simulator: owns the page table, the access pattern, and the run counters.
//!
//! A `Simulator` only exists once its configuration has been validated, so the
//! uninitialized state of the run is simply "no simulator yet". From there it
//! moves through `Running` one tick at a time and ends in `Terminated`.

use tracing::{debug, info};

use crate::common::error::{ConfigError, SimError};
use crate::common::ids::PageId;
use crate::config::Config;
use crate::mm::{Page, PageTable};
use crate::nfu::access::{self, AccessPattern};
use crate::nfu::{aging, eviction, swap};
use crate::report::{AccessOutcome, Reporter, TableStage};
use crate::stats::{SimStats, TickSummary};

/// Lifecycle of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Ticks remain; `next_tick` is the index of the next one.
    Running {
        /// Index of the tick that will run next.
        next_tick: u64,
    },
    /// All ticks have run.
    Terminated {
        /// Number of ticks that ran.
        ticks: u64,
    },
}

/// Top-level NFU simulator.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    table: PageTable,
    access: Box<dyn AccessPattern>,
    stats: SimStats,
    phase: Phase,
    begun: bool,
}

impl Simulator {
    /// Validates `config` and builds the initial page table.
    ///
    /// The access pattern is chosen by `config.access_model` and seeded from
    /// `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry is rejected; nothing is allocated
    /// in that case.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let access = access::build(config.access_model, config.seed);
        Self::with_access(config, access)
    }

    /// Builds a simulator driven by a caller-supplied access pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry is rejected.
    pub fn with_access(
        config: Config,
        access: Box<dyn AccessPattern>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let table = PageTable::new(config.virtual_memory_size, config.real_memory_size);
        let phase = if config.clock_count == 0 {
            Phase::Terminated { ticks: 0 }
        } else {
            Phase::Running { next_tick: 0 }
        };
        Ok(Self {
            config,
            table,
            access,
            stats: SimStats::default(),
            phase,
            begun: false,
        })
    }

    /// The configuration this run was built from.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The current page table.
    pub const fn page_table(&self) -> &PageTable {
        &self.table
    }

    /// Mutable access to the page table.
    ///
    /// Page locations can only be changed by the simulator itself; this is
    /// meant for presetting usage counters.
    pub const fn page_table_mut(&mut self) -> &mut PageTable {
        &mut self.table
    }

    /// Statistics accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Current lifecycle phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` once every tick has run.
    pub const fn is_terminated(&self) -> bool {
        matches!(self.phase, Phase::Terminated { .. })
    }

    /// Runs one tick with decisions drawn from the access pattern.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Terminated`] after the final tick, or any reporter
    /// or invariant error raised during the tick.
    pub fn tick<R: Reporter + ?Sized>(
        &mut self,
        reporter: &mut R,
    ) -> Result<TickSummary, SimError> {
        let tick = self.current_tick()?;
        self.begin(reporter)?;
        let decisions = aging::age(&mut self.table, self.access.as_mut(), tick);
        self.serve(tick, &decisions, reporter)
    }

    /// Runs one tick with caller-supplied decisions, one per page in id order.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DecisionCount`] if `decisions` does not cover every
    /// page, plus everything [`tick`](Self::tick) can return.
    pub fn tick_with<R: Reporter + ?Sized>(
        &mut self,
        decisions: &[bool],
        reporter: &mut R,
    ) -> Result<TickSummary, SimError> {
        let tick = self.current_tick()?;
        if decisions.len() != self.table.len() {
            return Err(SimError::DecisionCount {
                expected: self.table.len(),
                found: decisions.len(),
            });
        }
        self.begin(reporter)?;
        aging::apply(&mut self.table, decisions);
        self.serve(tick, decisions, reporter)
    }

    /// Runs every remaining tick and returns the final statistics.
    ///
    /// # Errors
    ///
    /// Returns the first reporter or invariant error raised.
    pub fn run<R: Reporter + ?Sized>(&mut self, reporter: &mut R) -> Result<SimStats, SimError> {
        info!(
            virtual_memory = self.config.virtual_memory_size,
            real_memory = self.config.real_memory_size,
            clocks = self.config.clock_count,
            seed = ?self.config.seed,
            model = ?self.config.access_model,
            "starting NFU simulation"
        );
        self.begin(reporter)?;
        while !self.is_terminated() {
            let _ = self.tick(reporter)?;
        }
        reporter.finish(&self.stats)?;
        info!(
            ticks = self.stats.ticks,
            hits = self.stats.hits,
            misses = self.stats.misses,
            "simulation finished"
        );
        Ok(self.stats.clone())
    }

    /// Reports the initial table once, before the first tick.
    fn begin<R: Reporter + ?Sized>(&mut self, reporter: &mut R) -> Result<(), SimError> {
        if !self.begun {
            reporter.begin(&self.config, &self.table)?;
            self.begun = true;
        }
        Ok(())
    }

    const fn current_tick(&self) -> Result<u64, SimError> {
        match self.phase {
            Phase::Running { next_tick } => Ok(next_tick),
            Phase::Terminated { ticks } => Err(SimError::Terminated(ticks)),
        }
    }

    /// Serves every access of `tick` after its counters have been aged.
    fn serve<R: Reporter + ?Sized>(
        &mut self,
        tick: u64,
        decisions: &[bool],
        reporter: &mut R,
    ) -> Result<TickSummary, SimError> {
        let used: Vec<PageId> = self
            .table
            .iter()
            .zip(decisions)
            .filter(|&(_, &used)| used)
            .map(|(page, _)| page.id())
            .collect();

        for &page in &used {
            reporter.access_scheduled(tick, page)?;
        }
        reporter.table(TableStage::Aged, tick, &self.table)?;

        for &page in &used {
            let resident = self.table.get(page).is_some_and(Page::is_resident);
            let outcome = if resident {
                self.stats.hits += 1;
                AccessOutcome::Hit
            } else {
                let Some(victim) = eviction::select_victim(&self.table) else {
                    panic!("no resident page to evict on clock {tick}: real memory is empty");
                };
                let event = swap::swap_in(&mut self.table, page, victim)?;
                self.stats.misses += 1;
                self.stats.evictions += 1;
                debug!(
                    tick,
                    target = page.val(),
                    victim = victim.val(),
                    frame = event.frame.val(),
                    slot = event.slot.val(),
                    "swapped page in"
                );
                AccessOutcome::Miss(event)
            };
            reporter.access(tick, page, outcome)?;
        }

        debug_assert_eq!(
            self.table.check_invariants(self.config.real_memory_size),
            Ok(())
        );
        reporter.table(TableStage::Swapped, tick, &self.table)?;

        self.stats.ticks += 1;
        let summary = TickSummary {
            tick,
            hits: self.stats.hits,
            misses: self.stats.misses,
        };
        debug!(tick, hits = summary.hits, misses = summary.misses, "tick complete");
        reporter.tick_end(&summary)?;

        let next_tick = tick + 1;
        self.phase = if next_tick >= self.config.clock_count {
            Phase::Terminated { ticks: next_tick }
        } else {
            Phase::Running { next_tick }
        };
        Ok(summary)
    }
}
