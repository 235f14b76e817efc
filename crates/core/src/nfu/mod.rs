//! NFU Policy Units.
//!
//! The pieces the simulator runs every tick, each usable on its own.
//!
//! # Units
//!
//! - `access`: Decides which pages are used this tick.
//! - `aging`: Shifts usage history into the 8-bit counters.
//! - `eviction`: Picks the resident page with the lowest counter.
//! - `swap`: Exchanges a missing page with its victim.

/// Per-page access decision sources.
pub mod access;

/// Usage counter aging.
pub mod aging;

/// Minimum-counter victim selection.
pub mod eviction;

/// Frame/slot exchange between a missing page and its victim.
pub mod swap;

pub use access::{AccessPattern, BiasedAccess, UniformAccess};
pub use aging::age_counter;
pub use eviction::select_victim;
pub use swap::{SwapEvent, swap_in};
