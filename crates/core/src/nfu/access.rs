//! Access Patterns.
//!
//! An access pattern decides, once per page per tick, whether the page is used.
//! The simulator owns its pattern and the pattern owns its random generator, so a
//! seeded run is fully reproducible.
//!
//! # Patterns
//!
//! - `Biased`: the usage counter doubles as the access probability out of 255.
//! - `Uniform`: a fair coin per page.

use std::fmt;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::common::constants::DRAW_RANGE;
use crate::config::AccessModel;
use crate::mm::Page;

/// Source of per-page access decisions.
pub trait AccessPattern: fmt::Debug {
    /// Decides whether `page` is used during the current tick.
    ///
    /// Called exactly once per page per tick, in ascending id order, before the
    /// page's counter is aged.
    fn decide(&mut self, page: &Page) -> bool;
}

/// Counter-weighted access decisions.
///
/// Draws uniformly from `0..255` and reports a use when the draw is strictly below
/// `counter + 1`. A page with a zero counter still has a 1 in 255 chance; any
/// counter of 254 or more is always used.
#[derive(Debug)]
pub struct BiasedAccess<R> {
    rng: R,
}

impl<R: Rng> BiasedAccess<R> {
    /// Creates a biased pattern drawing from `rng`.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + fmt::Debug> AccessPattern for BiasedAccess<R> {
    fn decide(&mut self, page: &Page) -> bool {
        let draw = self.rng.gen_range(0..DRAW_RANGE);
        draw < u32::from(page.counter) + 1
    }
}

/// History-independent access decisions (fair coin).
#[derive(Debug)]
pub struct UniformAccess<R> {
    rng: R,
}

impl<R: Rng> UniformAccess<R> {
    /// Creates a uniform pattern drawing from `rng`.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + fmt::Debug> AccessPattern for UniformAccess<R> {
    fn decide(&mut self, _page: &Page) -> bool {
        self.rng.gen_bool(0.5)
    }
}

/// Builds the access pattern for `model`.
///
/// With a seed the generator is deterministic; without one it is seeded from the
/// operating system.
pub fn build(model: AccessModel, seed: Option<u64>) -> Box<dyn AccessPattern> {
    let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    match model {
        AccessModel::Biased => Box::new(BiasedAccess::new(rng)),
        AccessModel::Uniform => Box::new(UniformAccess::new(rng)),
    }
}
