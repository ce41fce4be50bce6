//! Simulation of temperature.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use {Error, Result};

mod hotspot;

pub use self::hotspot::HotSpot;

/// The calling mode of the thermal solver.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// One thermal node per floorplan block.
    Block,
    /// A regular grid of thermal nodes.
    Grid,
}

/// A request to integrate a power trace into a temperature trace.
pub struct Job<'l> {
    /// The floorplan file.
    pub floorplan: &'l Path,
    /// The power trace.
    pub power_trace: &'l Path,
    /// The temperature trace to produce.
    pub temperature_trace: &'l Path,
    /// The sampling interval in seconds.
    pub interval: f64,
    /// The base processor frequency in hertz.
    pub frequency: f64,
    /// The side length of the heat sink in meters.
    pub sink_side: f64,
    /// The side length of the heat spreader in meters.
    pub spreader_side: f64,
}

/// A thermal solver.
pub trait Solver {
    /// Produce a temperature trace from a power trace.
    fn solve(&mut self, job: &Job) -> Result<()>;
}

impl Default for Mode {
    #[inline]
    fn default() -> Mode {
        Mode::Block
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(mode: &str) -> Result<Self> {
        match mode {
            "block" => Ok(Mode::Block),
            "grid" => Ok(Mode::Grid),
            _ => raise!("found an unknown calling mode ({:?})", mode),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Mode::Block => "block".fmt(formatter),
            Mode::Grid => "grid".fmt(formatter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Mode;

    #[test]
    fn mode() {
        assert_eq!("block".parse::<Mode>().unwrap(), Mode::Block);
        assert_eq!("grid".parse::<Mode>().unwrap(), Mode::Grid);
        assert!("steady".parse::<Mode>().is_err());
    }
}
