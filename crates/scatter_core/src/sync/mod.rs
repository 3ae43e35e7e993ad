//! # Generation Management for the Frame Pipeline
//!
//! ## The Problem
//!
//! ```text
//! Resolve for entity A:  READ  positions[target]
//! Resolve for entity B:  WRITE positions[B]      (B may be A's target)
//!
//! In place:   result depends on iteration order -> no parallelism
//! ```
//!
//! ## The Solution: Double Buffering
//!
//! ```text
//! Pass reads  buffer "current"
//! Pass writes buffer "next"
//! SWAP (index flip, no copy)
//! ```
//!
//! Zero locks. No order dependence. Every pass is embarrassingly parallel.

mod double_buffer;

pub use double_buffer::DoubleBuffer;
