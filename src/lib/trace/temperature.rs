use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use Result;

/// The separator preceding every fifth unit of the statistics report.
const SEPARATOR: &'static str = "----------------------------------";

/// The temperatures of one unit over a run, in row order.
pub struct Column {
    /// The name of the unit.
    pub name: String,
    /// The temperatures in degrees Celsius.
    pub values: Vec<f64>,
}

/// A temperature trace parsed into per-unit columns, in header order.
pub struct Summary(Vec<Column>);

/// The temperature statistics of one unit.
#[derive(Clone, Copy, Debug)]
pub struct Stats {
    /// The minimum.
    pub min: f64,
    /// The maximum.
    pub max: f64,
    /// The arithmetic mean.
    pub average: f64,
}

/// Read a temperature trace.
pub fn read<T: AsRef<Path>>(path: T) -> Result<Summary> {
    let mut content = String::new();
    let mut file = ok!(File::open(path));
    ok!(file.read_to_string(&mut content));
    parse(&content)
}

/// Parse a temperature trace: a tab-separated header of unit names followed
/// by one tab-separated row of values per sampled instant.
pub fn parse(content: &str) -> Result<Summary> {
    let mut lines = content.lines();
    let header = some!(lines.next(), "the temperature trace is empty");
    let mut columns = header.split('\t')
                            .map(|name| Column { name: name.to_string(), values: vec![] })
                            .collect::<Vec<_>>();
    for line in lines {
        let fields = line.split('\t').collect::<Vec<_>>();
        if fields.len() != columns.len() {
            raise!("found a row with {} values instead of {}", fields.len(), columns.len());
        }
        for (column, field) in columns.iter_mut().zip(fields.iter()) {
            match field.parse::<f64>() {
                Ok(value) => column.values.push(value),
                _ => raise!("found a malformed temperature ({:?})", field),
            }
        }
    }
    Ok(Summary(columns))
}

impl Column {
    /// Compute the statistics of the unit.
    ///
    /// Over zero rows, all three statistics are not a number.
    pub fn statistics(&self) -> Stats {
        use std::f64::NAN;
        let mut stats = Stats { min: NAN, max: NAN, average: NAN };
        if self.values.is_empty() {
            return stats;
        }
        let mut sum = 0.0;
        for &value in self.values.iter() {
            if !(stats.min <= value) {
                stats.min = value;
            }
            if !(stats.max >= value) {
                stats.max = value;
            }
            sum += value;
        }
        stats.average = sum / self.values.len() as f64;
        stats
    }
}

impl Summary {
    /// Write the statistics report, grouping the units in fives.
    pub fn report<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        let mut file = ok!(File::create(path));
        for (i, column) in self.0.iter().enumerate() {
            if i % 5 == 0 {
                ok!(write!(file, "{}\n", SEPARATOR));
            }
            let stats = column.statistics();
            ok!(write!(file, "{}:\n", column.name));
            ok!(write!(file, "  min: {}\n", stats.min));
            ok!(write!(file, "  max: {}\n", stats.max));
            ok!(write!(file, "  avg: {}\n\n", stats.average));
        }
        Ok(())
    }
}

deref! { Summary::0 => [Column] }

#[cfg(test)]
mod tests {
    use assert;
    use std::env;
    use std::fs::{self, File};
    use std::io::Read;

    use super::parse;

    #[test]
    fn parse_two_units() {
        let summary = parse("A\tB\n1\t3\n2\t4\n3\t5\n").unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(&summary[0].name, "A");
        assert_eq!(&summary[1].name, "B");

        let stats = summary[0].statistics();
        assert::close(&[stats.min, stats.max, stats.average], &[1.0, 3.0, 2.0], 1e-14);
        let stats = summary[1].statistics();
        assert::close(&[stats.min, stats.max, stats.average], &[3.0, 5.0, 4.0], 1e-14);
    }

    #[test]
    fn parse_no_rows() {
        let summary = parse("A\tB\n").unwrap();
        let stats = summary[0].statistics();
        assert!(stats.min.is_nan() && stats.max.is_nan() && stats.average.is_nan());
    }

    #[test]
    fn parse_malformed() {
        assert!(parse("").is_err());
        assert!(parse("A\tB\n1\n").is_err());
        assert!(parse("A\tB\n1\thot\n").is_err());
    }

    #[test]
    fn report() {
        let path = env::temp_dir().join(format!("cosim-report-{}", ::std::process::id()));
        let trace = (0..7).map(|i| format!("U{}", i)).collect::<Vec<_>>().join("\t") + "\n"
                  + &(0..7).map(|_| "40".to_string()).collect::<Vec<_>>().join("\t") + "\n";

        parse(&trace).unwrap().report(&path).unwrap();

        let mut content = String::new();
        File::open(&path).unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content.matches("----------------------------------\n").count(), 2);
        assert!(content.contains("U4:\n  min: 40\n  max: 40\n  avg: 40\n"));

        fs::remove_file(&path).unwrap();
    }
}
