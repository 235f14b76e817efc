//! Configuration system for the NFU simulator.
//!
//! This module defines the configuration structure used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline geometry and run length.
//! 2. **Structures:** The flat `Config` describing memory sizes, clock count, and randomness.
//! 3. **Enums:** The access model that decides which pages are used each tick.
//! 4. **Validation:** Fail-fast checks performed before any page table is built.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or built in code,
//! typically starting from `Config::default()`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Number of virtual pages.
    pub const VIRTUAL_MEMORY_SIZE: usize = 16;

    /// Number of real-memory frames.
    pub const REAL_MEMORY_SIZE: usize = 4;

    /// Number of clock ticks to simulate.
    pub const CLOCK_COUNT: u64 = 20;
}

/// Access models deciding which pages are used on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessModel {
    /// Access probability weighted by the page's usage counter.
    ///
    /// A page is used when a uniform draw from `0..255` is below its counter plus one,
    /// so recently used pages are more likely to be used again.
    #[default]
    #[serde(alias = "Biased")]
    Biased,
    /// Fair coin per page, independent of usage history.
    #[serde(alias = "Uniform")]
    Uniform,
}

/// Root configuration structure for one simulation run.
///
/// # Examples
///
/// ```
/// use nfusim_core::config::{AccessModel, Config};
///
/// let config = Config::from_json(
///     r#"{ "virtual_memory_size": 8, "real_memory_size": 3, "clock_count": 5, "seed": 7 }"#,
/// )
/// .unwrap();
/// assert_eq!(config.access_model, AccessModel::Biased);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Number of virtual pages (|VM|).
    #[serde(default = "Config::default_virtual_memory_size")]
    pub virtual_memory_size: usize,

    /// Number of real-memory frames (|RM|); must be smaller than |VM|.
    #[serde(default = "Config::default_real_memory_size")]
    pub real_memory_size: usize,

    /// Number of clock ticks to run.
    #[serde(default = "Config::default_clock_count")]
    pub clock_count: u64,

    /// Seed for the access generator; `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Access model used to generate page accesses.
    #[serde(default)]
    pub access_model: AccessModel,

    /// Emit the human-readable trace channel.
    #[serde(default = "Config::default_trace")]
    pub trace: bool,
}

impl Config {
    /// Creates a configuration with the given geometry and defaults elsewhere.
    pub fn new(virtual_memory_size: usize, real_memory_size: usize, clock_count: u64) -> Self {
        Self {
            virtual_memory_size,
            real_memory_size,
            clock_count,
            ..Self::default()
        }
    }

    /// Sets the access generator seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the access model.
    #[must_use]
    pub const fn with_access_model(mut self, model: AccessModel) -> Self {
        self.access_model = model;
        self
    }

    /// Parses a configuration from a JSON document.
    ///
    /// Missing fields take their default values. The result is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not valid JSON for `Config`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if its contents are not a valid configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks the geometry before any simulation state is created.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoRealMemory`] when there are no frames, and
    /// [`ConfigError::RealMemoryNotSmaller`] when |VM| <= |RM|.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.real_memory_size == 0 {
            return Err(ConfigError::NoRealMemory);
        }
        if self.virtual_memory_size <= self.real_memory_size {
            return Err(ConfigError::RealMemoryNotSmaller {
                virtual_memory: self.virtual_memory_size,
                real_memory: self.real_memory_size,
            });
        }
        Ok(())
    }

    /// Number of swap slots needed to hold every non-resident page.
    pub const fn swap_size(&self) -> usize {
        self.virtual_memory_size.saturating_sub(self.real_memory_size)
    }

    const fn default_virtual_memory_size() -> usize {
        defaults::VIRTUAL_MEMORY_SIZE
    }

    const fn default_real_memory_size() -> usize {
        defaults::REAL_MEMORY_SIZE
    }

    const fn default_clock_count() -> u64 {
        defaults::CLOCK_COUNT
    }

    const fn default_trace() -> bool {
        true
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            virtual_memory_size: defaults::VIRTUAL_MEMORY_SIZE,
            real_memory_size: defaults::REAL_MEMORY_SIZE,
            clock_count: defaults::CLOCK_COUNT,
            seed: None,
            access_model: AccessModel::default(),
            trace: true,
        }
    }
}
