//! # Simulation Configuration
//!
//! Every numeric knob of population seeding lives here instead of in
//! hidden constants. Configs are loaded once at startup from TOML; any
//! field left out takes its default.
//!
//! ```toml
//! seed = 7
//! regular_count = 250000
//! target_count = 12
//!
//! [regular_speed]
//! min = 0.5
//! max = 0.7
//! ```

use std::ops::RangeInclusive;
use std::path::Path;

use rand::Rng;
use serde::Deserialize;

use crate::error::{SimError, SimResult};

/// Inclusive `f32` range sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct FloatRange {
    /// Lower bound (inclusive).
    pub min: f32,
    /// Upper bound (inclusive).
    pub max: f32,
}

impl FloatRange {
    /// Creates a new range.
    #[inline]
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draws a uniform sample. A degenerate range always yields `min`.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.gen_range(self.min..=self.max)
    }

    fn validate(&self, name: &str, within: Option<RangeInclusive<f32>>) -> SimResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SimError::InvalidConfig(format!("{name} must be finite")));
        }
        if self.min > self.max {
            return Err(SimError::InvalidConfig(format!(
                "{name}: min {} > max {}",
                self.min, self.max
            )));
        }
        if !(self.max - self.min).is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "{name}: span {}..={} overflows f32",
                self.min, self.max
            )));
        }
        if let Some(limits) = within {
            if !limits.contains(&self.min) || !limits.contains(&self.max) {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must lie within {}..={}",
                    limits.start(),
                    limits.end()
                )));
            }
        }
        Ok(())
    }
}

/// Population and pipeline configuration.
///
/// Defaults reproduce the reference scene: a million white sprites and
/// twenty pastel "avoid this" emitters near the center.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// RNG seed. Same seed, same population, same frames.
    pub seed: u64,
    /// Number of regular (avoiding) objects, N.
    pub regular_count: usize,
    /// Number of avoid-target objects, K.
    pub target_count: usize,
    /// Speed range of regular objects.
    pub regular_speed: FloatRange,
    /// Speed range of avoid targets.
    pub target_speed: FloatRange,
    /// Regular objects pick a sprite index in `0..regular_sprite_count`.
    pub regular_sprite_count: u32,
    /// Sprite scale of regular objects.
    pub regular_scale: f32,
    /// Sprite index of avoid targets.
    pub target_sprite_index: u32,
    /// Sprite scale of avoid targets.
    pub target_scale: f32,
    /// Avoid targets spawn in the world bounds scaled by this factor.
    pub target_region_scale: f32,
    /// Per-channel color range of avoid targets.
    pub target_color: FloatRange,
    /// Radius around an avoid target that triggers a bounce.
    pub trigger_distance: f32,
    /// Minimum number of entities each rayon task processes.
    pub min_parallel_len: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0x5CA7_7E12,
            regular_count: 1_000_000,
            target_count: 20,
            regular_speed: FloatRange::new(0.5, 0.7),
            target_speed: FloatRange::new(0.1, 0.2),
            regular_sprite_count: 5,
            regular_scale: 1.0,
            target_sprite_index: 5,
            target_scale: 2.0,
            target_region_scale: 0.2,
            target_color: FloatRange::new(0.5, 1.0),
            trigger_distance: 1.3,
            min_parallel_len: 4096,
        }
    }
}

impl SimulationConfig {
    /// Parses a config from a TOML string and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigParse`] for malformed TOML or unknown keys,
    /// and [`SimError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> SimResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigIo`] if the file cannot be read, otherwise
    /// the same errors as [`from_toml_str`](Self::from_toml_str).
    pub fn from_toml_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Total entity count, N + K. Equals the number of sprites and the
    /// number of render records per frame.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::PopulationTooLarge`] if the sum does not fit the
    /// `u32` handle space.
    pub fn population(&self) -> SimResult<usize> {
        let total = self
            .regular_count
            .checked_add(self.target_count)
            .ok_or(SimError::PopulationTooLarge(usize::MAX))?;
        if total >= u32::MAX as usize {
            return Err(SimError::PopulationTooLarge(total));
        }
        Ok(total)
    }

    /// Checks every field against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] naming the first bad field, or
    /// [`SimError::PopulationTooLarge`].
    pub fn validate(&self) -> SimResult<()> {
        let _ = self.population()?;

        self.regular_speed.validate("regular_speed", Some(0.0..=f32::MAX))?;
        self.target_speed.validate("target_speed", Some(0.0..=f32::MAX))?;
        self.target_color.validate("target_color", Some(0.0..=1.0))?;

        if self.regular_sprite_count == 0 {
            return Err(SimError::InvalidConfig(
                "regular_sprite_count must be at least 1".into(),
            ));
        }
        for (name, value) in [
            ("regular_scale", self.regular_scale),
            ("target_scale", self.target_scale),
            ("trigger_distance", self.trigger_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.target_region_scale) {
            return Err(SimError::InvalidConfig(format!(
                "target_region_scale must lie within 0..=1, got {}",
                self.target_region_scale
            )));
        }
        if self.min_parallel_len == 0 {
            return Err(SimError::InvalidConfig(
                "min_parallel_len must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
