//! Error definitions.
//!
//! This module defines the error taxonomy of the simulator. It provides:
//! 1. **Configuration Errors:** Rejected geometry or unreadable input, raised before any state exists.
//! 2. **Invariant Violations:** Broken page-table bookkeeping, which always indicates a defect.
//! 3. **Simulation Errors:** The top-level error returned by the simulator and its reporters.

use std::io;

use thiserror::Error;

use super::ids::{FrameId, PageId, SwapSlot};

/// Errors raised while building or validating a configuration.
///
/// All of these are reported to the user before a page table is allocated.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The virtual memory is not strictly larger than the real memory.
    #[error(
        "Virtual Memory must be bigger than real memory (got |VM| = {virtual_memory}, |RM| = {real_memory})."
    )]
    RealMemoryNotSmaller {
        /// Requested number of virtual pages.
        virtual_memory: usize,
        /// Requested number of real-memory frames.
        real_memory: usize,
    },

    /// The real memory has no frames, so no page could ever be resident.
    #[error("Real memory must hold at least one frame.")]
    NoRealMemory,

    /// Input could not be parsed into a configuration.
    #[error("invalid input: {0}")]
    Parse(String),

    /// A configuration file could not be read.
    #[error("could not read configuration: {0}")]
    Io(#[from] io::Error),
}

/// A page-table bookkeeping rule that no longer holds.
///
/// These are never expected during a valid run; seeing one means the
/// simulator itself is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The number of resident pages differs from the number of frames.
    #[error("expected {expected} resident pages, found {found}")]
    ResidentCount {
        /// Number of real-memory frames.
        expected: usize,
        /// Number of pages currently holding a frame.
        found: usize,
    },

    /// Two pages claim the same real-memory frame.
    #[error("frame {frame} is held by pages {first} and {second}")]
    DuplicateFrame {
        /// The shared frame.
        frame: FrameId,
        /// Lower page id holding the frame.
        first: PageId,
        /// Higher page id holding the frame.
        second: PageId,
    },

    /// Two pages claim the same swap slot.
    #[error("swap slot {slot} is held by pages {first} and {second}")]
    DuplicateSwapSlot {
        /// The shared slot.
        slot: SwapSlot,
        /// Lower page id holding the slot.
        first: PageId,
        /// Higher page id holding the slot.
        second: PageId,
    },

    /// A swap was requested for a target that is already resident.
    #[error("swap target page {0} is already resident")]
    TargetResident(PageId),

    /// A swap was requested with a victim that is not resident.
    #[error("swap victim page {0} is not resident")]
    VictimNotResident(PageId),

    /// A page id outside the page table was used.
    #[error("page {page} is outside a table of {len} pages")]
    UnknownPage {
        /// The offending id.
        page: PageId,
        /// Number of pages in the table.
        len: usize,
    },
}

/// Top-level simulation error.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Page-table bookkeeping was found inconsistent.
    #[error("internal invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),

    /// A reporter sink failed to write.
    #[error("report output failed: {0}")]
    Report(#[from] io::Error),

    /// A decision vector did not cover every page.
    #[error("expected {expected} access decisions, got {found}")]
    DecisionCount {
        /// Number of pages in the table.
        expected: usize,
        /// Number of decisions supplied.
        found: usize,
    },

    /// A tick was requested after the final tick.
    #[error("simulation already terminated after {0} ticks")]
    Terminated(u64),
}
