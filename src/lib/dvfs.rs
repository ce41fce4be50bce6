//! Dynamic voltage and frequency scaling.

use Result;

/// A table mapping operating frequency to supply voltage.
///
/// Entries are ordered from the highest frequency to the lowest, and the last
/// entry is a sentinel at frequency zero, standing for the lowest supported
/// operating point.
pub struct Table(Vec<(f64, f64)>);

impl Table {
    /// Create a table for a technology node given in nanometers.
    pub fn new(technology: u32) -> Result<Table> {
        match technology {
            22 => Ok(Table(vec![
                (2000.0, 1.0),
                (1800.0, 0.9),
                (1500.0, 0.8),
                (1000.0, 0.7),
                (0.0, 0.6),
            ])),
            45 => Ok(Table(vec![
                (2000.0, 1.2),
                (1800.0, 1.1),
                (1500.0, 1.0),
                (1000.0, 0.9),
                (0.0, 0.8),
            ])),
            _ => raise!("no DVFS table is available for the {} nm technology node", technology),
        }
    }

    /// Look up the supply voltage for a frequency given in megahertz.
    ///
    /// The lookup scans from the highest frequency to the lowest and settles
    /// on the first entry not exceeding the requested frequency. Requests
    /// below the sentinel, including negative ones, resolve to the sentinel
    /// voltage.
    pub fn voltage(&self, frequency: f64) -> f64 {
        for &(f, v) in self.0.iter() {
            if frequency >= f {
                return v;
            }
        }
        self.0[self.0.len() - 1].1
    }
}

deref! { Table::0 => [(f64, f64)] }

#[cfg(test)]
mod tests {
    use super::Table;

    #[test]
    fn new_unsupported() {
        assert!(Table::new(32).is_err());
    }

    #[test]
    fn voltage() {
        let table = Table::new(22).unwrap();
        assert_eq!(table.voltage(2000.0), 1.0);
        assert_eq!(table.voltage(2500.0), 1.0);
        assert_eq!(table.voltage(1700.0), 0.9);
        assert_eq!(table.voltage(1500.0), 0.8);
        assert_eq!(table.voltage(500.0), 0.6);
        assert_eq!(table.voltage(0.0), 0.6);
    }

    #[test]
    fn voltage_negative() {
        let table = Table::new(45).unwrap();
        assert_eq!(table.voltage(-1.0), 0.8);
    }
}
