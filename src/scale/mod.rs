//! Scales mapping a domain of values into a range of character cells, and the
//! "nice" ticks (multiples of 1, 2 or 5 times a power of ten, or calendar
//! boundaries) used to label them.

pub use self::time::{tick_label, TimeInterval, UtcScale};

mod time;

// Thresholds (sqrt(50), sqrt(10), sqrt(2)) deciding between factors 10, 5, 2
const E10: f64 = 7.0710678118654755;
const E5: f64 = 3.1622776601683795;
const E2: f64 = 1.4142135623730951;

/// Spacing between consecutive nice ticks.
///
/// Steps below 1 are stored as their inverse, so that tick values are computed
/// as exact divisions (`3 / 20` rather than `3 * 0.05`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickStep {
    Multiple(f64),
    Fraction(f64),
}

impl TickStep {
    /// Nice step splitting `start..stop` in approximately `count` pieces.
    ///
    /// Returns None for empty or non finite intervals, or a zero count.
    pub fn new(start: f64, stop: f64, count: usize) -> Option<TickStep> {
        let (lo, hi) = if start <= stop {
            (start, stop)
        } else {
            (stop, start)
        };
        if count == 0 || !(hi > lo) || !(hi - lo).is_finite() {
            return None;
        }
        let step = (hi - lo) / count as f64;
        let power = step.log10().floor() as i32;
        let error = step / 10_f64.powi(power);
        let factor = if error >= E10 {
            10.0
        } else if error >= E5 {
            5.0
        } else if error >= E2 {
            2.0
        } else {
            1.0
        };
        if power < 0 {
            Some(TickStep::Fraction(10_f64.powi(-power) / factor))
        } else {
            Some(TickStep::Multiple(10_f64.powi(power) * factor))
        }
    }

    /// Length of the step.
    pub fn size(&self) -> f64 {
        match *self {
            TickStep::Multiple(step) => step,
            TickStep::Fraction(inverse) => 1.0 / inverse,
        }
    }

    /// Value of the `i`-th multiple of the step.
    pub fn at(&self, i: i64) -> f64 {
        match *self {
            TickStep::Multiple(step) => i as f64 * step,
            TickStep::Fraction(inverse) => i as f64 / inverse,
        }
    }

    /// Index of the last multiple of the step that is not above `value`.
    pub fn floor_index(&self, value: f64) -> i64 {
        self.scaled(value).floor() as i64
    }

    /// Index of the first multiple of the step that is not below `value`.
    pub fn ceil_index(&self, value: f64) -> i64 {
        self.scaled(value).ceil() as i64
    }

    /// Decimals needed to print multiples of this step without losing digits.
    pub fn decimals(&self) -> usize {
        match *self {
            TickStep::Multiple(_) => 0,
            TickStep::Fraction(inverse) => inverse.log10().ceil().max(0.0) as usize,
        }
    }

    fn scaled(&self, value: f64) -> f64 {
        match *self {
            TickStep::Multiple(step) => value / step,
            TickStep::Fraction(inverse) => value * inverse,
        }
    }
}

/// Nice ticks inside `start..=stop`, approximately `count` of them.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let step = match TickStep::new(start, stop, count) {
        Some(step) => step,
        None if start == stop && start.is_finite() && count > 0 => return vec![start],
        None => return vec![],
    };
    let (lo, hi) = (start.min(stop), start.max(stop));
    let mut values: Vec<f64> = (step.ceil_index(lo)..=step.floor_index(hi))
        .map(|i| step.at(i))
        .collect();
    if start > stop {
        values.reverse();
    }
    values
}

/// Maps a continuous numeric domain onto a continuous range (typically the
/// position of a character cell).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Position in the range of a value of the domain.  A degenerate domain
    /// maps everything to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Nice ticks covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Decimals needed to print the ticks returned by `ticks(count)`.
    pub fn tick_decimals(&self, count: usize) -> usize {
        TickStep::new(self.domain.0, self.domain.1, count).map_or(0, |s| s.decimals())
    }
}
