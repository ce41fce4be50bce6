use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::Command;

use host::Handle;
use output::Layout;
use super::{Estimator, OperatingPoint, Sample, Unit, UnitKind, UNITS};
use {Config, Result};

/// An estimator invoking the McPAT tool out of process.
///
/// Each invocation receives a generated configuration file listing the
/// per-core frequency and supply voltage, and a pair of snapshot names
/// delimiting the estimation window. The tool writes its result next to the
/// output base name; the result is a tab-separated file with one record per
/// line:
///
/// ```text
/// <category> <core> <component>/<metric> <value>
/// ```
///
/// where the category is `Core` or `L3`, and the metrics of interest are
/// `Runtime Dynamic` (watts) and `Area` (square millimeters).
pub struct McPat {
    path: PathBuf,
    directory: PathBuf,
    base: PathBuf,
}

impl McPat {
    /// Create an estimator.
    pub fn new(config: &Config, layout: &Layout) -> Result<McPat> {
        let path = some!(config.get::<String>("path"), "a path to the McPAT tool is required");
        Ok(McPat {
            path: PathBuf::from(path),
            directory: layout.root.clone(),
            base: layout.estimate.clone(),
        })
    }

    fn arguments(&self, previous: &Handle, current: &Handle) -> Vec<String> {
        vec![
            "-d".to_string(), format!("{}", self.directory.display()),
            "-o".to_string(), format!("{}", self.base.display()),
            "-c".to_string(), format!("{}", self.base.with_extension("cfg").display()),
            format!("--partial={}:{}", previous.name(), current.name()),
            "--no-graph".to_string(),
            "--no-text".to_string(),
        ]
    }
}

impl Estimator for McPat {
    fn estimate(&mut self, previous: &Handle, current: &Handle,
                operating: &[OperatingPoint]) -> Result<Sample> {

        let mut file = ok!(File::create(self.base.with_extension("cfg")));
        ok!(file.write_all(configure(operating).as_bytes()));
        drop(file);

        let output = ok!(Command::new(&self.path)
                                 .args(&self.arguments(previous, current))
                                 .output());
        if !output.status.success() {
            raise!("the power estimator failed: {}",
                   String::from_utf8_lossy(&output.stderr).trim());
        }

        let mut content = String::new();
        let mut file = ok!(File::open(self.base.with_extension("txt")));
        ok!(file.read_to_string(&mut content));
        parse(&content, operating.len())
    }
}

/// Render the estimator’s configuration file: the frequency of each core in
/// gigahertz and its supply voltage in volts.
fn configure(operating: &[OperatingPoint]) -> String {
    let frequencies = operating.iter()
                               .map(|point| format!("{:.6}", point.frequency / 1000.0))
                               .collect::<Vec<_>>()
                               .join(",");
    let voltages = operating.iter()
                            .map(|point| format!("{}", point.voltage))
                            .collect::<Vec<_>>()
                            .join(",");
    format!("[perf_model/core]\nfrequency[] = {}\n[power]\nvdd[] = {}\n", frequencies, voltages)
}

/// Parse the estimator’s result file.
///
/// Components missing from the mapping below are skipped; the fetch and
/// renaming components are merged into one instruction-fetch unit.
fn parse(content: &str, cores: usize) -> Result<Sample> {
    let mut sample = Sample { cores: vec![[Unit::default(); UNITS]; cores], llc: Unit::default() };
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields = line.split('\t').collect::<Vec<_>>();
        if fields.len() != 4 {
            raise!("encountered a malformed estimator record ({:?})", line);
        }
        let core = match fields[1].parse::<usize>() {
            Ok(core) => core,
            _ => raise!("encountered a malformed core index ({:?})", fields[1]),
        };
        let value = match fields[3].parse::<f64>() {
            Ok(value) => value,
            _ => raise!("encountered a malformed estimator value ({:?})", fields[3]),
        };
        let unit = match fields[0] {
            "Core" => {
                if core >= cores {
                    raise!("the estimator reported core {} out of {}", core, cores);
                }
                match component(fields[2]) {
                    Some(kind) => &mut sample.cores[core][kind as usize],
                    _ => continue,
                }
            },
            "L3" => &mut sample.llc,
            _ => continue,
        };
        if fields[2].ends_with("Runtime Dynamic") {
            unit.power += value;
        } else if fields[2].ends_with("Area") {
            unit.area += value;
        }
    }
    Ok(sample)
}

fn component(metric: &str) -> Option<UnitKind> {
    let name = match metric.find('/') {
        Some(position) => &metric[..position],
        _ => metric,
    };
    match name {
        "Execution Unit" => Some(UnitKind::ExecUnit),
        "Load Store Unit" => Some(UnitKind::L1Cache),
        "Instruction Fetch Unit" => Some(UnitKind::InstrFetch),
        "Renaming Unit" => Some(UnitKind::InstrFetch),
        "L2" => Some(UnitKind::L2Cache),
        "Memory Management Unit" => Some(UnitKind::Paging),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{configure, parse};
    use power::{OperatingPoint, UnitKind};

    #[test]
    fn configure_two_cores() {
        let operating = [
            OperatingPoint { frequency: 2000.0, voltage: 1.0 },
            OperatingPoint { frequency: 1500.0, voltage: 0.8 },
        ];
        assert_eq!(&configure(&operating),
                   "[perf_model/core]\nfrequency[] = 2.000000,1.500000\n\
                    [power]\nvdd[] = 1,0.8\n");
    }

    #[test]
    fn parse_merges_fetch_and_renaming() {
        let content = "Core\t0\tExecution Unit/Runtime Dynamic\t1.5\n\
                       Core\t0\tInstruction Fetch Unit/Runtime Dynamic\t0.25\n\
                       Core\t0\tRenaming Unit/Runtime Dynamic\t0.75\n\
                       Core\t0\tLoad Store Unit/Area\t3.5\n\
                       Core\t0\tNoC/Runtime Dynamic\t9.0\n\
                       L3\t0\tRuntime Dynamic\t2.5\n\
                       L3\t0\tArea\t12.0\n";
        let sample = parse(content, 1).unwrap();
        assert_eq!(sample.cores[0][UnitKind::ExecUnit as usize].power, 1.5);
        assert_eq!(sample.cores[0][UnitKind::InstrFetch as usize].power, 1.0);
        assert_eq!(sample.cores[0][UnitKind::L1Cache as usize].area, 3.5);
        assert_eq!(sample.llc.power, 2.5);
        assert_eq!(sample.llc.area, 12.0);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse("Core\t0\tExecution Unit/Runtime Dynamic\n", 1).is_err());
        assert!(parse("Core\tfoo\tExecution Unit/Runtime Dynamic\t1.0\n", 1).is_err());
        assert!(parse("Core\t4\tExecution Unit/Runtime Dynamic\t1.0\n", 1).is_err());
    }
}
