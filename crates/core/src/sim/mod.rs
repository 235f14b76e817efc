//! Simulation driver and batch analysis.
//!
//! Provides the tick-driven simulator and a helper for running many
//! independent simulations of the same geometry.

/// Repeated independent runs and their aggregate.
pub mod analysis;

/// The NFU simulator state machine.
pub mod simulator;

pub use simulator::{Phase, Simulator};
