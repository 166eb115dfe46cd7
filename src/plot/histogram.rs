use std::fmt;
use std::ops::Range;

use yansi::Color::Blue;

use crate::format::{F64Formatter, HorizontalScale};
use crate::scale::TickStep;
use crate::stats::Stats;

#[derive(Debug)]
/// A struct that represents a bucket of an histogram.
struct Bucket {
    range: Range<f64>,
    count: usize,
}

impl Bucket {
    fn new(range: Range<f64>) -> Self {
        Self { range, count: 0 }
    }

    fn inc(&mut self) {
        self.count += 1;
    }
}

/// A struct holding data to plot a Histogram of numerical data.
///
/// Bucket boundaries are nice round numbers: the range of the data is
/// extended outwards to multiples of a step of 1, 2 or 5 times a power of
/// ten.
pub struct Histogram {
    vec: Vec<Bucket>,
    step: Option<TickStep>,
    // Step index of the lower boundary of the first bucket
    first: i64,
    // Maximum of all bucket counts
    top: usize,
    last: usize,
    stats: Stats,
    precision: Option<usize>, // If None, then human friendly display will be used
}

/// A struct representing the options to build an histogram.
#[derive(Default)]
pub struct HistogramOptions {
    /// `intervals` is the approximate number of histogram buckets to display.
    /// The actual number depends on the step that best fits the data.
    pub intervals: usize,
    /// `precision` is an Option with the number of decimals to display.  If
    /// "None" is used, human units will be used, with an heuristic based on the
    /// input data for deciding the units and the decimal places.
    pub precision: Option<usize>,
}

impl Histogram {
    /// Creates a Histogram from a vector of numerical data.
    ///
    /// `options` is a `HistogramOptions` struct with the preferences to create
    /// histogram.
    pub fn new(vec: &[f64], mut options: HistogramOptions) -> Self {
        options.intervals = options.intervals.clamp(1, vec.len().max(1));
        let stats = Stats::new(vec, options.precision);
        let mut histogram = Self::new_with_stats(stats, &options);
        histogram.load(vec);
        histogram
    }

    /// Creates a Histogram with no input data.
    ///
    /// Parameters are similar to those on the `new` method, but a parameter
    /// named `stats` is needed to decide how future data (to be injected with
    /// the load method) will be accommodated.
    pub fn new_with_stats(stats: Stats, options: &HistogramOptions) -> Self {
        let step = TickStep::new(stats.min, stats.max, options.intervals.max(1));
        let (first, vec) = Self::build_buckets(stats.min..stats.max, step);
        Self {
            last: vec.len() - 1,
            vec,
            step,
            first,
            top: 0,
            stats,
            precision: options.precision,
        }
    }

    /// Add to the `Histogram` data the values of a slice of numerical data.
    pub fn load(&mut self, vec: &[f64]) {
        for x in vec {
            self.add(*x);
        }
    }

    /// Add to the `Histogram` a single piece of numerical data.  Values out of
    /// the range of the buckets are discarded.
    pub fn add(&mut self, n: f64) {
        if let Some(slot) = self.find_slot(n) {
            self.vec[slot].inc();
            self.top = self.top.max(self.vec[slot].count);
        }
    }

    /// Counts of every bucket, from lower to upper values.
    pub fn counts(&self) -> Vec<usize> {
        self.vec.iter().map(|b| b.count).collect()
    }

    fn lower(&self) -> f64 {
        self.vec[0].range.start
    }

    fn upper(&self) -> f64 {
        self.vec[self.last].range.end
    }

    fn find_slot(&self, n: f64) -> Option<usize> {
        if !(n >= self.lower() && n <= self.upper()) {
            return None;
        }
        match self.step {
            Some(step) => Some(((step.floor_index(n) - self.first).max(0) as usize).min(self.last)),
            None => Some(0),
        }
    }

    fn build_buckets(range: Range<f64>, step: Option<TickStep>) -> (i64, Vec<Bucket>) {
        match step {
            Some(step) => {
                let first = step.floor_index(range.start);
                let last = step.ceil_index(range.end).max(first + 1);
                let vec = (first..last)
                    .map(|i| Bucket::new(step.at(i)..step.at(i + 1)))
                    .collect();
                (first, vec)
            }
            // Single value (or no data at all)
            None => (0, vec![Bucket::new(range)]),
        }
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.stats)?;
        let formatter = match self.precision {
            None => F64Formatter::new_with_range(self.lower()..self.upper()),
            Some(n) => F64Formatter::new(n),
        };
        let writer = HistWriter {
            width: f.width().unwrap_or(110),
            formatter,
        };
        writer.write(f, self)
    }
}

struct HistWriter {
    width: usize,
    formatter: F64Formatter,
}

impl HistWriter {
    pub fn write(&self, f: &mut fmt::Formatter, hist: &Histogram) -> fmt::Result {
        let width_range = self.get_width(hist);
        let width_count = hist.top.to_string().len();
        let horizontal_scale =
            HorizontalScale::new(hist.top / self.get_max_bar_len(width_range + width_count));
        writeln!(f, "{horizontal_scale}")?;
        for x in &hist.vec {
            self.write_bucket(f, x, &horizontal_scale, width_range, width_count)?;
        }
        Ok(())
    }

    fn write_bucket(
        &self,
        f: &mut fmt::Formatter,
        bucket: &Bucket,
        horizontal_scale: &HorizontalScale,
        width: usize,
        width_count: usize,
    ) -> fmt::Result {
        writeln!(
            f,
            "[{range}] [{count}] {bar}",
            range = Blue.paint(format!(
                "{:>width$} .. {:>width$}",
                self.formatter.format(bucket.range.start),
                self.formatter.format(bucket.range.end),
                width = width,
            )),
            count = horizontal_scale.get_count(bucket.count, width_count),
            bar = horizontal_scale.get_bar(bucket.count)
        )
    }

    fn get_width(&self, hist: &Histogram) -> usize {
        hist.vec
            .iter()
            .flat_map(|b| [b.range.start, b.range.end])
            .map(|x| self.formatter.format(x).len())
            .max()
            .unwrap_or(1)
    }

    fn get_max_bar_len(&self, fixed_width: usize) -> usize {
        const EXTRA_CHARS: usize = 10;
        if self.width < fixed_width + EXTRA_CHARS + 1 {
            75
        } else {
            self.width - fixed_width - EXTRA_CHARS
        }
    }
}
