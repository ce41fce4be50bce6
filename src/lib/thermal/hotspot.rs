use std::path::PathBuf;
use std::process::Command;

use output::Layout;
use super::{Job, Mode, Solver};
use {Config, Result};

/// The number of grid rows.
const GRID_ROWS: usize = 128;

/// The number of grid columns.
const GRID_COLS: usize = 128;

/// A solver invoking the HotSpot tool out of process.
///
/// The tool is invoked twice: a preheat pass integrates the whole power
/// trace into a steady-state file, and the real pass starts from that file
/// and writes the temperature trace.
pub struct HotSpot {
    path: PathBuf,
    config: PathBuf,
    steady: PathBuf,
    mode: Mode,
}

impl HotSpot {
    /// Create a solver.
    pub fn new(config: &Config, mode: Mode, layout: &Layout) -> Result<HotSpot> {
        let path = some!(config.get::<String>("path"), "a path to the HotSpot tool is required");
        let configuration = some!(config.get::<String>("config"),
                                  "a path to the HotSpot configuration is required");
        Ok(HotSpot {
            path: PathBuf::from(path),
            config: PathBuf::from(configuration),
            steady: layout.steady.clone(),
            mode: mode,
        })
    }

    fn arguments(&self, job: &Job, preheat: bool) -> Vec<String> {
        let mut arguments = vec!["-c".to_string(), format!("{}", self.config.display())];
        if !preheat {
            arguments.push("-init_file".to_string());
            arguments.push(format!("{}", self.steady.display()));
        }
        arguments.push("-f".to_string());
        arguments.push(format!("{}", job.floorplan.display()));
        arguments.push("-p".to_string());
        arguments.push(format!("{}", job.power_trace.display()));
        arguments.push("-o".to_string());
        arguments.push(format!("{}", job.temperature_trace.display()));
        if preheat {
            arguments.push("-steady_file".to_string());
            arguments.push(format!("{}", self.steady.display()));
        }
        arguments.push("-model_type".to_string());
        arguments.push(format!("{}", self.mode));
        arguments.push("-grid_rows".to_string());
        arguments.push(format!("{}", GRID_ROWS));
        arguments.push("-grid_cols".to_string());
        arguments.push(format!("{}", GRID_COLS));
        arguments.push("-sampling_intvl".to_string());
        arguments.push(format!("{}", job.interval));
        arguments.push("-base_proc_freq".to_string());
        arguments.push(format!("{}", job.frequency));
        arguments.push("-s_sink".to_string());
        arguments.push(format!("{}", job.sink_side));
        arguments.push("-s_spreader".to_string());
        arguments.push(format!("{}", job.spreader_side));
        arguments
    }

    fn run(&self, job: &Job, preheat: bool) -> Result<()> {
        let output = ok!(Command::new(&self.path)
                                 .args(&self.arguments(job, preheat))
                                 .output());
        if !output.status.success() {
            raise!("the thermal solver failed: {}",
                   String::from_utf8_lossy(&output.stderr).trim());
        }
        Ok(())
    }
}

impl Solver for HotSpot {
    fn solve(&mut self, job: &Job) -> Result<()> {
        info!(target: "Thermal", "Calling mode: {}.", self.mode);
        info!(target: "Thermal", "Sampling interval: {} s.", job.interval);
        info!(target: "Thermal", "Base frequency: {} Hz.", job.frequency);
        try!(self.run(job, true));
        self.run(job, false)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use output::Layout;
    use thermal::{Job, Mode};
    use super::HotSpot;

    fn job<'l>() -> Job<'l> {
        Job {
            floorplan: Path::new("chip.flp"),
            power_trace: Path::new("power.ptrace"),
            temperature_trace: Path::new("temperature.ttrace"),
            interval: 0.5e-3,
            frequency: 2e9,
            sink_side: 0.06,
            spreader_side: 0.03,
        }
    }

    fn solver() -> HotSpot {
        HotSpot {
            path: "hotspot".into(),
            config: "hotspot.config".into(),
            steady: Layout::new("results").steady,
            mode: Mode::Block,
        }
    }

    #[test]
    fn arguments_preheat() {
        let arguments = solver().arguments(&job(), true);
        assert_eq!(arguments, [
            "-c", "hotspot.config",
            "-f", "chip.flp",
            "-p", "power.ptrace",
            "-o", "temperature.ttrace",
            "-steady_file", "results/hotspot_temperature.init",
            "-model_type", "block",
            "-grid_rows", "128",
            "-grid_cols", "128",
            "-sampling_intvl", "0.0005",
            "-base_proc_freq", "2000000000",
            "-s_sink", "0.06",
            "-s_spreader", "0.03",
        ]);
    }

    #[test]
    fn arguments_real() {
        let arguments = solver().arguments(&job(), false);
        assert_eq!(&arguments[..4], ["-c", "hotspot.config",
                                     "-init_file", "results/hotspot_temperature.init"]);
        assert!(!arguments.contains(&"-steady_file".to_string()));
    }
}
