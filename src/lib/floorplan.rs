//! Synthesis of chip floorplans.
//!
//! Given per-unit silicon areas of one representative core and the area of
//! the shared last-level cache, the synthesizer derives the overall chip
//! geometry and lays the functional units out according to a declarative
//! recipe. Only the sizes of the units depend on the areas; their adjacency
//! is fixed by the recipe.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use power::{self, UnitKind, UNITS};
use Result;

/// The aspect ratio of the chip (width to height).
const ASPECT_RATIO: f64 = 1.5;

/// The relative increase of the heat-sink side over the chip width.
const SINK_FACTOR: f64 = 2.771590061;

/// The relative increase of the heat-spreader side over the chip width.
const SPREADER_FACTOR: f64 = 0.8857950303;

/// The maximal number of cores in a row.
const ROW_LENGTH: usize = 4;

/// A rectangle of a floorplan, in meters.
#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle {
    /// The name of the unit.
    pub name: String,
    /// The width.
    pub width: f64,
    /// The height.
    pub height: f64,
    /// The left edge.
    pub x: f64,
    /// The bottom edge.
    pub y: f64,
}

/// The overall geometry of a chip.
#[derive(Clone, Copy, Debug)]
pub struct Chip {
    /// The total area.
    pub area: f64,
    /// The width.
    pub width: f64,
    /// The height.
    pub height: f64,
    /// The width of one core.
    pub core_width: f64,
    /// The height of one core.
    pub core_height: f64,
    /// The side length of the heat sink.
    pub sink_side: f64,
    /// The side length of the heat spreader.
    pub spreader_side: f64,
}

/// A floorplan.
pub struct Floorplan {
    /// The chip geometry.
    pub chip: Chip,
    rectangles: Vec<Rectangle>,
}

/// One placement step of a core layout recipe.
///
/// Each step is interpreted against the remaining free region of the core,
/// which starts out as the whole core and shrinks as units are placed.
#[derive(Clone, Copy, Debug)]
pub enum Step {
    /// Span the full remaining width at the bottom of the region; the height
    /// follows from the unit’s area, and the region loses it.
    Spread(UnitKind),
    /// Span the full remaining height at the left of the region; the width
    /// follows from the unit’s area, and the region loses it.
    Raise(UnitKind),
}

/// A core layout recipe: an ordered sequence of placement steps covering
/// every functional unit exactly once.
pub struct Recipe(Vec<Step>);

impl Recipe {
    /// Create the recipe of a Nehalem-like core: the execution unit spans
    /// the bottom, the instruction-fetch unit the left flank, the L1 cache
    /// the middle band, and the paging unit and the L2 cache share the top.
    pub fn nehalem() -> Recipe {
        Recipe(vec![
            Step::Spread(UnitKind::ExecUnit),
            Step::Raise(UnitKind::InstrFetch),
            Step::Spread(UnitKind::L1Cache),
            Step::Raise(UnitKind::Paging),
            Step::Raise(UnitKind::L2Cache),
        ])
    }

    /// Place the units of one core, returning the rectangles in trace column
    /// order.
    fn interpret(&self, core: usize, areas: &[f64; UNITS], width: f64, height: f64,
                 x: f64, y: f64) -> Result<Vec<Rectangle>> {

        let mut placed: [Option<Rectangle>; UNITS] = [None, None, None, None, None];
        let (mut x, mut y) = (x, y);
        let (mut width, mut height) = (width, height);
        for step in self.0.iter() {
            let (kind, rectangle) = match *step {
                Step::Spread(kind) => {
                    if width <= 0.0 {
                        raise!("ran out of width placing the {} unit", kind.label());
                    }
                    let extent = areas[kind as usize] / width;
                    let rectangle = Rectangle {
                        name: power::column(core, kind),
                        width: width,
                        height: extent,
                        x: x,
                        y: y,
                    };
                    y += extent;
                    height -= extent;
                    (kind, rectangle)
                },
                Step::Raise(kind) => {
                    if height <= 0.0 {
                        raise!("ran out of height placing the {} unit", kind.label());
                    }
                    let extent = areas[kind as usize] / height;
                    let rectangle = Rectangle {
                        name: power::column(core, kind),
                        width: extent,
                        height: height,
                        x: x,
                        y: y,
                    };
                    x += extent;
                    width -= extent;
                    (kind, rectangle)
                },
            };
            if placed[kind as usize].is_some() {
                raise!("the recipe places the {} unit twice", kind.label());
            }
            placed[kind as usize] = Some(rectangle);
        }
        let mut rectangles = Vec::with_capacity(UNITS);
        for (slot, kind) in placed.iter_mut().zip(power::KINDS.iter()) {
            match slot.take() {
                Some(rectangle) => rectangles.push(rectangle),
                _ => raise!("the recipe does not place the {} unit", kind.label()),
            }
        }
        Ok(rectangles)
    }
}

/// Synthesize a floorplan from the per-unit areas of one core and the area
/// of the last-level cache, all in square meters.
pub fn synthesize(areas: &[f64; UNITS], llc: f64, cores: usize,
                  recipe: &Recipe) -> Result<Floorplan> {

    if cores == 0 {
        raise!("at least one core is required");
    }
    for (kind, &area) in power::KINDS.iter().zip(areas.iter()) {
        if area <= 0.0 {
            raise!("the area of the {} unit should be positive, not {}", kind.label(), area);
        }
    }
    if llc <= 0.0 {
        raise!("the area of the last-level cache should be positive, not {}", llc);
    }

    let core_area = areas.iter().fold(0.0, |sum, &area| sum + area);
    let chip_area = core_area * cores as f64 + llc;
    let chip_height = (chip_area / ASPECT_RATIO).sqrt();
    let chip_width = chip_area / chip_height;

    let columns = if cores < ROW_LENGTH { cores } else { ROW_LENGTH };
    let rows = (cores + ROW_LENGTH - 1) / ROW_LENGTH;
    let core_width = chip_width / columns as f64;
    let core_height = core_area / core_width;

    let mut rectangles = Vec::with_capacity(cores * UNITS + 1);
    for core in 0..cores {
        let x = (core % ROW_LENGTH) as f64 * core_width;
        let y = (core / ROW_LENGTH) as f64 * core_height;
        rectangles.extend(try!(recipe.interpret(core, areas, core_width, core_height, x, y)));
    }

    let llc_width = columns as f64 * core_width;
    rectangles.push(Rectangle {
        name: power::LLC.to_string(),
        width: llc_width,
        height: llc / llc_width,
        x: 0.0,
        y: rows as f64 * core_height,
    });

    let chip = Chip {
        area: chip_area,
        width: chip_width,
        height: chip_height,
        core_width: core_width,
        core_height: core_height,
        sink_side: chip_width * (1.0 + SINK_FACTOR),
        spreader_side: chip_width * (1.0 + SPREADER_FACTOR),
    };
    Ok(Floorplan { chip: chip, rectangles: rectangles })
}

impl Floorplan {
    /// Write the floorplan file, one `name width height x y` line per
    /// rectangle.
    pub fn write<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        let mut file = ok!(File::create(path));
        for rectangle in self.rectangles.iter() {
            ok!(write!(file, "{} {} {} {} {}\n", rectangle.name, rectangle.width,
                       rectangle.height, rectangle.x, rectangle.y));
        }
        Ok(())
    }
}

impl Chip {
    /// Write the geometry report.
    pub fn report<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        let mut file = ok!(File::create(path));
        ok!(write!(file, "Chip area: {}\n", self.area));
        ok!(write!(file, "Chip width: {}\n", self.width));
        ok!(write!(file, "Chip height: {}\n\n", self.height));
        ok!(write!(file, "Core width: {}\n", self.core_width));
        ok!(write!(file, "Core height: {}\n", self.core_height));
        ok!(write!(file, "Core area: {}\n", self.core_width * self.core_height));
        ok!(write!(file, "Core aspect ratio: {}\n\n", self.core_height / self.core_width));
        ok!(write!(file, "Heat sink side: {}\n", self.sink_side));
        ok!(write!(file, "Heat spreader side: {}\n\n", self.spreader_side));
        Ok(())
    }
}

deref! { Floorplan::rectangles => [Rectangle] }

#[cfg(test)]
mod tests {
    use assert;

    use super::{synthesize, Recipe, Rectangle, ASPECT_RATIO};
    use power::UNITS;

    const AREAS: [f64; UNITS] = [12e-6, 6e-6, 5e-6, 4e-6, 3e-6];
    const LLC: f64 = 30e-6;

    fn overlap(one: &Rectangle, other: &Rectangle) -> f64 {
        let width = (one.x + one.width).min(other.x + other.width) - one.x.max(other.x);
        let height = (one.y + one.height).min(other.y + other.height) - one.y.max(other.y);
        if width > 0.0 && height > 0.0 { width * height } else { 0.0 }
    }

    #[test]
    fn conservation() {
        let floorplan = synthesize(&AREAS, LLC, 2, &Recipe::nehalem()).unwrap();
        let sum = floorplan[..UNITS].iter()
                                    .fold(0.0, |sum, unit| sum + unit.width * unit.height);
        assert::close(&[sum], &[30e-6], 1e-16);
        assert::close(&[floorplan.chip.area], &[2.0 * 30e-6 + LLC], 1e-16);
        assert::close(&[floorplan.chip.width * floorplan.chip.height],
                      &[floorplan.chip.area], 1e-16);
        assert::close(&[floorplan.chip.height / floorplan.chip.width],
                      &[1.0 / ASPECT_RATIO], 1e-12);
    }

    #[test]
    fn no_overlap() {
        let floorplan = synthesize(&AREAS, LLC, 1, &Recipe::nehalem()).unwrap();
        for i in 0..floorplan.len() {
            for j in (i + 1)..floorplan.len() {
                assert!(overlap(&floorplan[i], &floorplan[j]) < 1e-15,
                        "{} overlaps {}", floorplan[i].name, floorplan[j].name);
            }
        }
    }

    #[test]
    fn tiling() {
        let floorplan = synthesize(&AREAS, LLC, 6, &Recipe::nehalem()).unwrap();
        let chip = floorplan.chip;

        // Cores 0–3 form the first row, cores 4–5 the second.
        assert::close(&[floorplan[4 * UNITS].x], &[0.0], 1e-16);
        assert::close(&[floorplan[4 * UNITS].y], &[chip.core_height], 1e-16);
        assert::close(&[floorplan[5 * UNITS].x], &[chip.core_width], 1e-16);

        // The last-level cache is a strip below all core rows.
        let llc = &floorplan[6 * UNITS];
        assert_eq!(&llc.name, "L3Cache");
        assert::close(&[llc.y], &[2.0 * chip.core_height], 1e-16);
        assert::close(&[llc.width], &[4.0 * chip.core_width], 1e-16);
        assert::close(&[llc.width * llc.height], &[LLC], 1e-16);
    }

    #[test]
    fn degenerate() {
        let mut areas = AREAS;
        areas[2] = 0.0;
        assert!(synthesize(&areas, LLC, 1, &Recipe::nehalem()).is_err());
        assert!(synthesize(&AREAS, -1.0, 1, &Recipe::nehalem()).is_err());
        assert!(synthesize(&AREAS, LLC, 0, &Recipe::nehalem()).is_err());
    }
}
