//! Estimation of dynamic power.

use host::Handle;
use Result;

mod mcpat;

pub use self::mcpat::McPat;

/// The functional units of a core, in trace column order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnitKind {
    /// The execution unit.
    ExecUnit,
    /// The L1 data cache together with the load–store machinery.
    L1Cache,
    /// The instruction-fetch unit, including renaming.
    InstrFetch,
    /// The L2 cache.
    L2Cache,
    /// The paging unit.
    Paging,
}

/// The number of functional units per core.
pub const UNITS: usize = 5;

/// The functional units of a core, in trace column order.
pub const KINDS: [UnitKind; UNITS] = [
    UnitKind::ExecUnit,
    UnitKind::L1Cache,
    UnitKind::InstrFetch,
    UnitKind::L2Cache,
    UnitKind::Paging,
];

/// The column name of the shared last-level cache.
pub const LLC: &'static str = "L3Cache";

/// The power and area estimate of one functional unit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Unit {
    /// The dynamic power in watts.
    pub power: f64,
    /// The area in square millimeters.
    pub area: f64,
}

/// A power sample: one estimate per functional unit of every core plus one
/// for the shared last-level cache.
#[derive(Clone, Debug)]
pub struct Sample {
    /// The per-core estimates, following the order of `KINDS`.
    pub cores: Vec<[Unit; UNITS]>,
    /// The estimate of the last-level cache.
    pub llc: Unit,
}

/// The operating point of a core.
#[derive(Clone, Copy, Debug)]
pub struct OperatingPoint {
    /// The frequency in megahertz.
    pub frequency: f64,
    /// The supply voltage in volts.
    pub voltage: f64,
}

/// A power estimator.
pub trait Estimator {
    /// Estimate the power drawn between two statistics snapshots.
    fn estimate(&mut self, previous: &Handle, current: &Handle,
                operating: &[OperatingPoint]) -> Result<Sample>;
}

impl UnitKind {
    /// Return the label of the unit.
    pub fn label(&self) -> &'static str {
        match *self {
            UnitKind::ExecUnit => "ExecUnit",
            UnitKind::L1Cache => "L1Cache",
            UnitKind::InstrFetch => "InstrFetch",
            UnitKind::L2Cache => "L2Cache",
            UnitKind::Paging => "Paging",
        }
    }
}

/// Return the trace column name of a functional unit.
#[inline]
pub fn column(core: usize, kind: UnitKind) -> String {
    format!("Core_{}_{}", core, kind.label())
}

impl Sample {
    /// Return the per-unit areas of the first core and the area of the
    /// last-level cache, converted to square meters.
    pub fn areas(&self) -> Result<([f64; UNITS], f64)> {
        let core = some!(self.cores.first(), "the sample contains no cores");
        let mut areas = [0.0; UNITS];
        for (area, unit) in areas.iter_mut().zip(core.iter()) {
            *area = unit.area * 1e-6;
        }
        Ok((areas, self.llc.area * 1e-6))
    }
}

#[cfg(test)]
mod tests {
    use super::{column, Sample, Unit, UnitKind, UNITS};

    #[test]
    fn column_name() {
        assert_eq!(&column(2, UnitKind::InstrFetch), "Core_2_InstrFetch");
    }

    #[test]
    fn areas() {
        let sample = Sample {
            cores: vec![[Unit { power: 0.0, area: 2.0 }; UNITS]],
            llc: Unit { power: 0.0, area: 8.0 },
        };
        let (areas, llc) = sample.areas().unwrap();
        assert_eq!(areas, [2e-6; UNITS]);
        assert_eq!(llc, 8e-6);
    }

    #[test]
    fn areas_empty() {
        let sample = Sample { cores: vec![], llc: Unit::default() };
        assert!(sample.areas().is_err());
    }
}
