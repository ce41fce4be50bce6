//! Reading and writing of traces.
//!
//! Both traces are tab-separated tables with one column per functional unit:
//! the power trace is written incrementally, one row per sampled instant,
//! and the temperature trace is read back in full once the thermal solver
//! has finished.

mod power;
mod temperature;

pub use self::power::Writer;
pub use self::temperature::{read, Column, Stats, Summary};
