use std::fs::OpenOptions;
use std::io::Write as WriteFile;
use std::path::PathBuf;

use floorplan::{self, Chip, Recipe};
use output::Layout;
use power::{self, Sample, KINDS, LLC};
use Result;

/// A writer appending power samples to the power trace.
///
/// The very first append writes the header row and synthesizes the floorplan
/// from the areas of that same sample; the areas of later samples have no
/// further effect on the layout. Each append opens, writes, and closes the
/// trace file so that no rows are lost if the process dies.
pub struct Writer {
    cores: usize,
    recipe: Recipe,
    trace: PathBuf,
    floorplan: PathBuf,
    chip_info: PathBuf,
    chip: Option<Chip>,
}

impl Writer {
    /// Create a writer.
    pub fn new(cores: usize, recipe: Recipe, layout: &Layout) -> Writer {
        Writer {
            cores: cores,
            recipe: recipe,
            trace: layout.power_trace.clone(),
            floorplan: layout.floorplan.clone(),
            chip_info: layout.chip_info.clone(),
            chip: None,
        }
    }

    getter! { chip: Option<Chip> }

    /// Check whether anything has been written yet.
    #[inline(always)]
    pub fn written(&self) -> bool {
        self.chip.is_some()
    }

    /// Append one row of per-unit power values.
    pub fn append(&mut self, sample: &Sample) -> Result<()> {
        if sample.cores.len() != self.cores {
            raise!("expected a sample for {} cores, not {}", self.cores, sample.cores.len());
        }
        let mut prologue = None;
        if self.chip.is_none() {
            let (areas, llc) = try!(sample.areas());
            prologue = Some(try!(floorplan::synthesize(&areas, llc, self.cores, &self.recipe)));
        }
        let mut file = ok!(OpenOptions::new().append(true).create(true).open(&self.trace));
        if let Some(floorplan) = prologue {
            ok!(file.write_all(self.header().as_bytes()));
            try!(floorplan.write(&self.floorplan));
            try!(floorplan.chip.report(&self.chip_info));
            info!(target: "Trace", "The floorplan was created.");
            self.chip = Some(floorplan.chip);
        }
        ok!(file.write_all(self.row(sample).as_bytes()));
        Ok(())
    }

    fn header(&self) -> String {
        let mut columns = Vec::with_capacity(self.cores * KINDS.len() + 1);
        for core in 0..self.cores {
            for &kind in KINDS.iter() {
                columns.push(power::column(core, kind));
            }
        }
        columns.push(LLC.to_string());
        columns.join("\t") + "\n"
    }

    fn row(&self, sample: &Sample) -> String {
        let mut values = Vec::with_capacity(self.cores * KINDS.len() + 1);
        for core in sample.cores.iter() {
            for unit in core.iter() {
                values.push(format!("{}", unit.power));
            }
        }
        values.push(format!("{}", sample.llc.power));
        values.join("\t") + "\n"
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs::{self, File};
    use std::io::Read;

    use floorplan::Recipe;
    use output::Layout;
    use power::{Sample, Unit, UNITS};
    use super::Writer;

    fn sample(cores: usize) -> Sample {
        Sample {
            cores: vec![[Unit { power: 1.5, area: 2.0 }; UNITS]; cores],
            llc: Unit { power: 0.25, area: 8.0 },
        }
    }

    fn read(path: &::std::path::Path) -> String {
        let mut content = String::new();
        File::open(path).unwrap().read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn append() {
        let root = env::temp_dir().join(format!("cosim-writer-{}", ::std::process::id()));
        let layout = Layout::new(&root);
        layout.scrub().unwrap();

        let mut writer = Writer::new(2, Recipe::nehalem(), &layout);
        assert!(!writer.written());

        for _ in 0..3 {
            writer.append(&sample(2)).unwrap();
        }
        assert!(writer.written());

        let content = read(&layout.power_trace);
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 1 + 3);
        assert_eq!(lines[0].split('\t').count(), 2 * UNITS + 1);
        assert_eq!(lines[0].split('\t').next().unwrap(), "Core_0_ExecUnit");
        assert_eq!(lines[0].split('\t').last().unwrap(), "L3Cache");
        assert_eq!(lines[1], "1.5\t1.5\t1.5\t1.5\t1.5\t1.5\t1.5\t1.5\t1.5\t1.5\t0.25");

        assert_eq!(read(&layout.floorplan).lines().count(), 2 * UNITS + 1);
        assert!(read(&layout.chip_info).starts_with("Chip area: "));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn append_mismatch() {
        let root = env::temp_dir().join(format!("cosim-mismatch-{}", ::std::process::id()));
        let layout = Layout::new(&root);
        layout.scrub().unwrap();

        let mut writer = Writer::new(4, Recipe::nehalem(), &layout);
        assert!(writer.append(&sample(2)).is_err());
        assert!(!layout.power_trace.exists());

        fs::remove_dir_all(&root).unwrap();
    }
}
