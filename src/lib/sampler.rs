//! Scheduling of power and temperature computations.

use std::fs::OpenOptions;
use std::io::Write;
use std::time::Instant;

use dvfs;
use floorplan::Recipe;
use host::{Host, Ring};
use output::Layout;
use power::{Estimator, OperatingPoint, Sample};
use thermal::{Job, Solver};
use trace::{self, Summary, Writer};
use {Config, Result, Time, MS, US};

/// The minimal simulated time between two power computations.
const THROTTLE: Time = 10 * US;

/// The default calling interval.
const INTERVAL: Time = MS;

/// A sampler coordinating power and temperature computations.
///
/// The sampler is driven synchronously by the host engine: `tick` fires at
/// the calling interval, `sync` right before the host persists its own
/// statistics, and `finish` once at the end of the simulation. A power
/// computation takes a snapshot of the host’s statistics, estimates the
/// power drawn since the previous snapshot, and appends the estimate to the
/// power trace; `finish` hands the accumulated trace to the thermal solver
/// and summarizes the resulting temperatures.
pub struct Sampler<H, E, S> where H: Host, E: Estimator, S: Solver {
    host: H,
    estimator: E,
    solver: S,
    table: dvfs::Table,
    writer: Writer,
    layout: Layout,
    interval: Time,
    frequency: f64,
    ring: Ring,
    time_last: Time,
    last: Option<Sample>,
    writing: bool,
}

impl<H, E, S> Sampler<H, E, S> where H: Host, E: Estimator, S: Solver {
    /// Create a sampler.
    ///
    /// The results directory of the layout is scrubbed.
    pub fn new(host: H, estimator: E, solver: S, config: &Config,
               layout: Layout) -> Result<Sampler<H, E, S>> {

        let interval = config.get::<i64>("interval")
                             .map(|&interval| interval as Time)
                             .unwrap_or(INTERVAL);
        if interval == 0 {
            raise!("the calling interval should be positive");
        }
        let technology = *some!(config.get::<i64>("technology"),
                                "a technology node is required");
        let table = try!(dvfs::Table::new(technology as u32));
        let frequency = *some!(config.get::<f64>("frequency"),
                               "a base frequency is required") * 1e9;
        try!(layout.scrub());
        let writer = Writer::new(host.cores(), Recipe::nehalem(), &layout);
        Ok(Sampler {
            host: host,
            estimator: estimator,
            solver: solver,
            table: table,
            writer: writer,
            layout: layout,
            interval: interval,
            frequency: frequency,
            ring: Ring::new(),
            time_last: 0,
            last: None,
            writing: false,
        })
    }

    getter! { interval: Time }

    /// Return the host.
    #[inline(always)]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Return the trace writer.
    #[inline(always)]
    pub fn writer(&self) -> &Writer {
        &self.writer
    }

    /// Process a periodic tick.
    #[inline]
    pub fn tick(&mut self) -> Result<()> {
        self.update()
    }

    /// Process the host’s pre-statistics-write hook.
    ///
    /// The hook also fires for the sampler’s own snapshot writes, in which
    /// case it is a no-op.
    pub fn sync(&mut self) -> Result<()> {
        if self.writing {
            return Ok(());
        }
        self.update()
    }

    /// Recompute power if simulated time has advanced far enough.
    ///
    /// The computation is throttled: once a sample exists, at least 10 µs of
    /// simulated time have to pass before the next one, no matter how often
    /// the triggers fire.
    pub fn update(&mut self) -> Result<()> {
        let time = self.host.time();
        if time == self.time_last {
            return Ok(());
        }
        debug_assert!(time > self.time_last);
        if self.last.is_some() && time - self.time_last < THROTTLE {
            return Ok(());
        }
        let (current, previous) = self.ring.advance();
        self.writing = true;
        let written = self.host.write_snapshot(&current);
        self.writing = false;
        try!(written);
        if let Some(previous) = previous {
            let operating = self.operating();
            let sample = try!(self.estimator.estimate(&previous, &current, &operating));
            try!(self.writer.append(&sample));
            try!(self.host.delete_snapshot(&previous, false));
            self.last = Some(sample);
        }
        self.time_last = time;
        Ok(())
    }

    /// Finish the run: release the remaining snapshot and, provided that at
    /// least one sample has been written, run the thermal stage.
    pub fn finish(mut self) -> Result<Summary> {
        if let Some(handle) = self.ring.take() {
            try!(self.host.delete_snapshot(&handle, true));
        }
        let chip = match self.writer.chip() {
            Some(chip) => chip,
            _ => raise!("the power trace was never written; \
                         try to decrease the calling interval"),
        };

        info!(target: "Sampler", "Starting the temperature simulation...");
        let start = Instant::now();
        try!(self.solver.solve(&Job {
            floorplan: &self.layout.floorplan,
            power_trace: &self.layout.power_trace,
            temperature_trace: &self.layout.temperature_trace,
            interval: self.interval as f64 / self.frequency,
            frequency: self.frequency,
            sink_side: chip.sink_side,
            spreader_side: chip.spreader_side,
        }));
        let elapsed = start.elapsed();
        let elapsed = elapsed.as_secs() as f64 + elapsed.subsec_nanos() as f64 * 1e-9;
        info!(target: "Sampler", "Finished the temperature simulation in {:.2} seconds.",
              elapsed);
        let mut file = ok!(OpenOptions::new().append(true).open(&self.layout.chip_info));
        ok!(write!(file, "Simulation duration: {} seconds.", elapsed));

        let summary = try!(trace::read(&self.layout.temperature_trace));
        try!(summary.report(&self.layout.statistics));
        Ok(summary)
    }

    fn operating(&self) -> Vec<OperatingPoint> {
        (0..self.host.cores()).map(|core| {
            let frequency = self.host.frequency(core);
            OperatingPoint { frequency: frequency, voltage: self.table.voltage(frequency) }
        }).collect()
    }
}
