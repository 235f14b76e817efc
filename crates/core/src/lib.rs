//! Not Frequently Used (NFU) page-replacement simulator library.
//!
//! This crate models a set of virtual pages competing for a smaller pool of real-memory
//! frames and replays the NFU algorithm one clock tick at a time:
//! 1. **Memory model:** Pages, frame and swap-slot identifiers, and the page table arena.
//! 2. **Policy:** Counter aging, biased access generation, victim selection, and swapping.
//! 3. **Simulation:** The tick-driven state machine plus batch analysis over many runs.
//! 4. **Reporting:** Human-readable trace output and a CSV summary of hits and misses.
//! 5. **Support:** Configuration, error types, and run statistics.

/// Common types and constants (identifiers, errors, counter constants).
pub mod common;
/// Simulator configuration (defaults, access model, validation).
pub mod config;
/// Memory model (pages and the page table arena).
pub mod mm;
/// NFU policy units (aging, access patterns, eviction, swapping).
pub mod nfu;
/// Reporting sinks for trace and summary output.
pub mod report;
/// Simulation state machine and batch analysis.
pub mod sim;
/// Run statistics collection and printing.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Top-level simulator owning the page table, access pattern, and counters.
pub use crate::sim::Simulator;
/// Hit/miss statistics for a run.
pub use crate::stats::SimStats;
