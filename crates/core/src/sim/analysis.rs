//! Batch analysis.
//!
//! Runs the same geometry many times and keeps only each run's final totals,
//! for studying how hit rates spread across random workloads. Runs are
//! independent: each gets a fresh simulator and, when a base seed is given,
//! the seed `base + run`.

use tracing::info;

use crate::common::error::SimError;
use crate::config::Config;
use crate::report::NullReporter;

use super::simulator::Simulator;

/// Final totals of one run in a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// Zero-based run index.
    pub run: usize,
    /// Seed the run used, if seeded.
    pub seed: Option<u64>,
    /// Total hits.
    pub hits: u64,
    /// Total misses.
    pub misses: u64,
}

impl RunOutcome {
    /// Fraction of the run's accesses that hit; zero when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Aggregate over a batch of runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatchSummary {
    /// Number of runs.
    pub runs: usize,
    /// Mean hits per run.
    pub mean_hits: f64,
    /// Mean misses per run.
    pub mean_misses: f64,
    /// Mean of the per-run hit rates.
    pub mean_hit_rate: f64,
    /// Lowest per-run hit rate.
    pub min_hit_rate: f64,
    /// Highest per-run hit rate.
    pub max_hit_rate: f64,
}

/// Runs `runs` independent simulations of `config` without tracing.
///
/// # Errors
///
/// Returns the configuration error before any run starts, or the first error
/// raised by a run.
pub fn run_batch(config: &Config, runs: usize) -> Result<Vec<RunOutcome>, SimError> {
    config.validate()?;
    info!(runs, "starting batch analysis");

    (0..runs)
        .map(|run| -> Result<RunOutcome, SimError> {
            let seed = config.seed.map(|base| base.wrapping_add(run as u64));
            let mut run_config = config.clone();
            run_config.seed = seed;
            run_config.trace = false;

            let mut sim = Simulator::new(run_config)?;
            let stats = sim.run(&mut NullReporter)?;
            Ok(RunOutcome {
                run,
                seed,
                hits: stats.hits,
                misses: stats.misses,
            })
        })
        .collect()
}

/// Summarizes a batch; returns `None` for an empty batch.
pub fn summarize(outcomes: &[RunOutcome]) -> Option<BatchSummary> {
    if outcomes.is_empty() {
        return None;
    }
    let n = outcomes.len() as f64;
    let rates: Vec<f64> = outcomes.iter().map(RunOutcome::hit_rate).collect();
    Some(BatchSummary {
        runs: outcomes.len(),
        mean_hits: outcomes.iter().map(|o| o.hits as f64).sum::<f64>() / n,
        mean_misses: outcomes.iter().map(|o| o.misses as f64).sum::<f64>() / n,
        mean_hit_rate: rates.iter().sum::<f64>() / n,
        min_hit_rate: rates.iter().copied().fold(f64::INFINITY, f64::min),
        max_hit_rate: rates.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}
