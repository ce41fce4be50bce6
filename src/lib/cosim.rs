//! Tool for coupling power and thermal simulation of multicore chips.
//!
//! The library coordinates a running architectural simulation, a power
//! estimator, and a thermal solver: it periodically samples the simulation’s
//! statistics, derives per-unit dynamic power, synthesizes a floorplan from
//! estimated silicon areas, and finally integrates the accumulated power
//! trace into a temperature trace, which it then summarizes.

#[cfg(test)]
extern crate assert;

#[macro_use]
extern crate log;

extern crate configuration;

#[macro_use]
mod macros;

mod result;

pub mod dvfs;
pub mod floorplan;
pub mod host;
pub mod output;
pub mod power;
pub mod sampler;
pub mod thermal;
pub mod trace;

pub use result::{Error, Result};

/// A configuration.
pub type Config = configuration::Tree;

/// Simulated time in nanoseconds.
pub type Time = u64;

/// One microsecond of simulated time.
pub const US: Time = 1_000;

/// One millisecond of simulated time.
pub const MS: Time = 1_000_000;
