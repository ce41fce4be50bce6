//! Layout of the results directory.

use std::fs;
use std::path::{Path, PathBuf};

use Result;

/// The artifacts of a run, all placed in one results directory.
pub struct Layout {
    /// The results directory.
    pub root: PathBuf,
    /// The chip geometry report.
    pub chip_info: PathBuf,
    /// The power trace.
    pub power_trace: PathBuf,
    /// The floorplan.
    pub floorplan: PathBuf,
    /// The temperature trace.
    pub temperature_trace: PathBuf,
    /// The temperature statistics.
    pub statistics: PathBuf,
    /// The base name of the power estimator’s output.
    pub estimate: PathBuf,
    /// The steady-state file of the thermal solver.
    pub steady: PathBuf,
}

impl Layout {
    /// Create a layout.
    pub fn new<T: AsRef<Path>>(root: T) -> Layout {
        let root = root.as_ref().to_path_buf();
        Layout {
            chip_info: root.join("hotspot_chip_info.txt"),
            power_trace: root.join("hotspot_power_trace.ptrace"),
            floorplan: root.join("hotspot_nehalem_detailed.flp"),
            temperature_trace: root.join("temperature.ttrace"),
            statistics: root.join("hotspot_stats.txt"),
            estimate: root.join("hotspot_power_temp"),
            steady: root.join("hotspot_temperature.init"),
            root: root,
        }
    }

    /// Clear the results directory, creating it if it does not exist.
    ///
    /// Failures to remove individual entries are logged and otherwise
    /// ignored.
    pub fn scrub(&self) -> Result<()> {
        if !self.root.exists() {
            ok!(fs::create_dir_all(&self.root));
            return Ok(());
        }
        for entry in ok!(fs::read_dir(&self.root)) {
            let entry = ok!(entry);
            if let Err(error) = fs::remove_file(entry.path()) {
                warn!(target: "Output", "Failed to remove {:?} ({}).", entry.path(), error);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};
    use std::env;

    use super::Layout;

    #[test]
    fn scrub() {
        let root = env::temp_dir().join(format!("cosim-scrub-{}", ::std::process::id()));
        let layout = Layout::new(&root);

        layout.scrub().unwrap();
        assert!(root.exists());

        File::create(&layout.power_trace).unwrap();
        layout.scrub().unwrap();
        assert!(!layout.power_trace.exists());

        fs::remove_dir_all(&root).unwrap();
    }
}
