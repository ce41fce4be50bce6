#[macro_use]
extern crate log;

extern crate arguments;
extern crate cosim;
extern crate term;

use log::LogLevel;
use std::path::{Path, PathBuf};

use cosim::trace;

pub use cosim::{Error, Result};

const USAGE: &'static str = "
Usage: cosim [options] <trace>

Summarize a temperature trace produced by the thermal solver: compute the
minimal, maximal, and average temperature of every functional unit.

Options:
    --output <path>          Output file for the statistics [default: <trace>.txt].

    --verbose                Display progress information.
    --help                   Display this message.
";

macro_rules! raise(
    ($message:expr) => (return Err(::cosim::Error::new($message)));
    ($($arg:tt)*) => (raise!(format!($($arg)*)));
);

macro_rules! ok(
    ($result:expr) => (match $result {
        Ok(result) => result,
        Err(error) => raise!(error),
    });
);

macro_rules! some(
    ($option:expr, $($arg:tt)*) => (match $option {
        Some(value) => value,
        _ => raise!($($arg)*),
    });
);

mod logger;

use logger::Logger;

fn main() {
    start().unwrap_or_else(|error| fail(error));
}

fn start() -> Result<()> {
    let arguments = ok!(arguments::parse(std::env::args()));

    if arguments.get::<bool>("help").unwrap_or(false) {
        help();
    }

    if arguments.get::<bool>("verbose").unwrap_or(false) {
        Logger::install(LogLevel::Info);
    } else {
        Logger::install(LogLevel::Warn);
    }

    let path = some!(arguments.orphans.first(), "a temperature trace is required");
    let path = Path::new(path);
    if std::fs::metadata(path).is_err() {
        raise!("the temperature trace {:?} does not exist", path);
    }
    let output = arguments.get::<String>("output")
                          .map(PathBuf::from)
                          .unwrap_or_else(|| path.with_extension("txt"));

    info!(target: "Cosim", "Summarizing {:?}...", path);
    let summary = try!(trace::read(path));
    try!(summary.report(&output));
    info!(target: "Cosim", "Processed {} units into {:?}.", summary.len(), &output);

    Ok(())
}

fn help() -> ! {
    println!("{}", USAGE.trim());
    std::process::exit(0);
}

#[allow(unused_must_use)]
fn fail(error: Error) -> ! {
    use std::io::Write;
    if let Some(mut output) = term::stderr() {
        output.fg(term::color::RED);
        output.write_all(format!("Error: {}.\n", error).as_bytes());
    }
    std::process::exit(1);
}
