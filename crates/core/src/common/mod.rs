//! Common utilities and types used throughout the NFU simulator.
//!
//! This module provides the building blocks shared by every other component:
//! 1. **Identifiers:** Strong types for page ids, real-memory frames, and swap slots.
//! 2. **Constants:** Counter bit layout, draw range, and report formatting constants.
//! 3. **Error Handling:** Configuration, invariant, and simulation error types.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for configuration, invariants, and simulation.
pub mod error;

/// Page, frame, and swap-slot identifier types.
pub mod ids;

pub use constants::{COUNTER_MSB, DRAW_RANGE};
pub use error::{ConfigError, InvariantViolation, SimError};
pub use ids::{FrameId, PageId, SwapSlot};
