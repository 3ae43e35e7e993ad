//! # Simulation Error Types
//!
//! Everything that can fail is confined to initialization and config
//! loading. The frame path has no recoverable errors: handle misuse and
//! undersized output buffers are programming errors and panic.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    /// Reserving an arena's backing storage failed.
    #[error("failed to reserve {requested} {component} slots")]
    Allocation {
        /// Component type whose arena could not be reserved.
        component: &'static str,
        /// Number of slots requested.
        requested: usize,
    },

    /// World bounds are inverted or not finite.
    #[error("invalid world bounds: {0}")]
    InvalidBounds(String),

    /// A configuration value is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The requested population does not fit in the `u32` handle space.
    #[error("population of {0} entities exceeds handle space")]
    PopulationTooLarge(usize),

    /// A stored handle points past the end of its target arena.
    #[error("dangling {component} handle {index} (arena length {len})")]
    DanglingHandle {
        /// Component type the handle refers to.
        component: &'static str,
        /// Offending slot index.
        index: usize,
        /// Length of the target arena.
        len: usize,
    },

    /// The config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigIo {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`SimulationConfig`](crate::SimulationConfig).
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for simulation setup.
pub type SimResult<T> = Result<T, SimError>;
