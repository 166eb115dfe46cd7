use std::env;
use std::fmt::Display;

use chrono::{DateTime, Utc};
use clap::ArgMatches;
use regex::Regex;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use yansi::Paint;

use sunstats::plot;
use sunstats::random;
use sunstats::read::DataReaderBuilder;
use sunstats::table::{self, Grid, Table};

#[macro_use]
extern crate log;

mod app;

/// Sets up color choices (for output and logging) and the logger.
fn configure_output(option: &str, verbose: bool) {
    let mut color_choice = ColorChoice::Auto;
    match option {
        "no" => {
            Paint::disable();
            color_choice = ColorChoice::Never;
        }
        "auto" => match env::var("TERM") {
            Ok(value) if value == "dumb" => Paint::disable(),
            _ => {
                if atty::isnt(atty::Stream::Stdout) {
                    Paint::disable();
                }
            }
        },
        _ => color_choice = ColorChoice::Always,
    };
    TermLogger::init(
        if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        ConfigBuilder::new()
            .set_time_level(LevelFilter::Trace)
            .set_thread_level(LevelFilter::Trace)
            .set_target_level(LevelFilter::Trace)
            .build(),
        TerminalMode::Stderr,
        color_choice,
    )
    .unwrap_or_else(|_| eprintln!("[ERROR] Failed to configure logger"));
}

/// Unwraps a result or logs its error and exits with code 1.
fn or_exit<T, E: Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            error!("{}", error);
            std::process::exit(1);
        }
    }
}

fn get_table(matches: &ArgMatches) -> Table {
    match matches.get_one::<String>("data") {
        Some(path) => {
            let mut builder = DataReaderBuilder::default();
            if let Some(string) = matches.get_one::<String>("regex") {
                builder.regex(or_exit(Regex::new(string)));
            }
            if let Some(separator) = matches.get_one::<char>("separator") {
                builder.separator(*separator);
            }
            let table = or_exit(or_exit(builder.build()).read(path));
            debug!("Read {} series of {} rows", table.series().len(), table.rows());
            table
        }
        None => Table::sunshine(),
    }
}

fn precision(matches: &ArgMatches) -> Option<usize> {
    matches.get_one::<usize>("precision").copied()
}

fn diff(matches: &ArgMatches) {
    let table = get_table(matches);
    let left = matches.get_one::<String>("left").map_or("Seattle", |s| s.as_str());
    let right = matches.get_one::<String>("right").map_or("Chicago", |s| s.as_str());
    let rows = or_exit(table.differences(left, right));
    print!("{}", Grid::new(&rows, precision(matches)));
}

fn corr(matches: &ArgMatches) {
    let table = get_table(matches);
    let correlation = or_exit(table.correlations());
    if correlation.corr_sf.is_nan() || correlation.corr_chi.is_nan() {
        warn!("Some series have no variance, correlation is undefined");
    }
    print!("{}", Grid::new(&[correlation], precision(matches)));
}

fn fold(matches: &ArgMatches) {
    let table = get_table(matches);
    print!("{}", Grid::new(&table.fold(), precision(matches)));
}

fn rollup(matches: &ArgMatches) {
    let table = get_table(matches);
    let stats = table::rollup(&table.fold());
    print!("{}", Grid::new(&stats, precision(matches)));
}

fn histogram(matches: &ArgMatches) {
    let samples = matches.get_one::<usize>("samples").copied().unwrap_or(10000);
    if samples == 0 {
        warn!("No data to process");
        std::process::exit(0);
    }
    let vec = random::uniform_samples(samples, matches.get_one::<u64>("seed").copied());
    let options = plot::HistogramOptions {
        intervals: matches.get_one::<usize>("intervals").copied().unwrap_or(20),
        precision: precision(matches),
    };
    let histogram = plot::Histogram::new(&vec, options);
    let width = matches.get_one::<usize>("width").copied().unwrap_or(110);
    print!("{:width$}", histogram, width = width);
}

fn axes(matches: &ArgMatches) {
    let mut builder = plot::AxesBuilder::default();
    if let Some(width) = matches.get_one::<usize>("width") {
        builder.width(*width);
    }
    if let Some(height) = matches.get_one::<usize>("height") {
        builder.height(*height);
    }
    let from = matches.get_one::<DateTime<Utc>>("from");
    let to = matches.get_one::<DateTime<Utc>>("to");
    if let (Some(from), Some(to)) = (from, to) {
        builder.x_domain((*from, *to));
    }
    let min = matches.get_one::<f64>("min");
    let max = matches.get_one::<f64>("max");
    if let (Some(min), Some(max)) = (min, max) {
        builder.y_domain((*min, *max));
    }
    print!("{}", or_exit(builder.build()));
}

fn main() {
    let matches = app::get_app().get_matches();
    configure_output(
        matches
            .get_one::<String>("color")
            .map_or("auto", |s| s.as_str()),
        matches.get_one::<bool>("verbose").copied().unwrap_or(false),
    );
    match matches.subcommand() {
        Some(("diff", subcommand_matches)) => {
            diff(subcommand_matches);
        }
        Some(("corr", subcommand_matches)) => {
            corr(subcommand_matches);
        }
        Some(("fold", subcommand_matches)) => {
            fold(subcommand_matches);
        }
        Some(("rollup", subcommand_matches)) => {
            rollup(subcommand_matches);
        }
        Some(("hist", subcommand_matches)) => {
            histogram(subcommand_matches);
        }
        Some(("axes", subcommand_matches)) => {
            axes(subcommand_matches);
        }
        _ => unreachable!("Invalid subcommand"),
    };
}
