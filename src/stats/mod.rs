use std::fmt;

use yansi::Color::Blue;

use crate::format::F64Formatter;

/// Arithmetic mean of the values (NaN for an empty slice).
pub fn mean(vec: &[f64]) -> f64 {
    vec.iter().sum::<f64>() / vec.len() as f64
}

/// Median of the values.  For an even amount of values this is the average of
/// the two middle ones.  NaN for an empty slice.
pub fn median(vec: &[f64]) -> f64 {
    if vec.is_empty() {
        return f64::NAN;
    }
    let mut sorted = vec.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    } else {
        sorted[middle]
    }
}

/// Population variance (sum of squared deviations divided by `n`).
pub fn variance(vec: &[f64]) -> f64 {
    let avg = mean(vec);
    vec.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / vec.len() as f64
}

/// Population standard deviation.
pub fn std_dev(vec: &[f64]) -> f64 {
    variance(vec).sqrt()
}

/// Pearson correlation coefficient between two paired samples.
///
/// Returns `None` if the samples are empty or have different lengths.  If any
/// of them has no variance the result is NaN.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.is_empty() || x.len() != y.len() {
        return None;
    }
    let (x_avg, y_avg) = (mean(x), mean(y));
    let mut cov = 0.0;
    let mut x_sq = 0.0;
    let mut y_sq = 0.0;
    for (a, b) in x.iter().zip(y.iter()) {
        cov += (a - x_avg) * (b - y_avg);
        x_sq += (a - x_avg).powi(2);
        y_sq += (b - y_avg).powi(2);
    }
    Some(cov / (x_sq * y_sq).sqrt())
}

/// Nonparametric skew: `(mean - median) / std_dev`.
///
/// Any non finite outcome (a constant sample has a zero standard deviation)
/// is reported as 0.
pub fn skew(vec: &[f64]) -> f64 {
    Stats::new(vec, None).skew()
}

#[derive(Debug)]
/// A struct holding statistical data regarding a unsorted set of numerical
/// values.
pub struct Stats {
    /// Minimum of the input values.
    pub min: f64,
    /// Maximum of the input values.
    pub max: f64,
    /// Average of the input values.
    pub avg: f64,
    /// Median of the input values.
    pub med: f64,
    /// Standard deviation of the input values.
    pub std: f64,
    /// Variance of the input values.
    pub var: f64,
    /// Number of samples of the input values.
    pub samples: usize,
    precision: Option<usize>, // If None, then human friendly display will be used
}

impl Stats {
    /// Creates a Stats struct from a slice of numerical data.
    ///
    /// `precision` is an Option with the number of decimals to display.  If
    /// "None" is used, human units will be used, with an heuristic based on the
    /// input data for deciding the units and the decimal places.
    pub fn new(vec: &[f64], precision: Option<usize>) -> Self {
        let min = vec.iter().copied().fold(f64::INFINITY, f64::min);
        let max = vec.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let var = variance(vec);
        Self {
            min,
            max,
            avg: mean(vec),
            med: median(vec),
            std: var.sqrt(),
            var,
            samples: vec.len(),
            precision,
        }
    }

    /// Skew derived from the already computed moments, 0 when not finite.
    pub fn skew(&self) -> f64 {
        let value = (self.avg - self.med) / self.std;
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let formatter = match self.precision {
            None => F64Formatter::new_with_range(self.min..self.max),
            Some(n) => F64Formatter::new(n),
        };
        writeln!(
            f,
            "Samples = {len}; Min = {min}; Max = {max}",
            len = Blue.paint(self.samples.to_string()),
            min = Blue.paint(formatter.format(self.min)),
            max = Blue.paint(formatter.format(self.max)),
        )?;
        writeln!(
            f,
            "Average = {avg}; Median = {med}; Variance = {var}; STD = {std}",
            avg = Blue.paint(formatter.format(self.avg)),
            med = Blue.paint(formatter.format(self.med)),
            var = Blue.paint(format!("{:.3}", self.var)),
            std = Blue.paint(format!("{:.3}", self.std)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use serial_test::serial;
    use yansi::Paint;

    const SEATTLE: [f64; 12] = [
        69.0, 108.0, 178.0, 207.0, 253.0, 268.0, 312.0, 281.0, 221.0, 142.0, 72.0, 52.0,
    ];
    const CHICAGO: [f64; 12] = [
        135.0, 136.0, 187.0, 215.0, 281.0, 311.0, 318.0, 283.0, 226.0, 193.0, 113.0, 106.0,
    ];

    #[test]
    fn basic_test() {
        let stats = Stats::new(&[1.1, 3.3, 2.2], Some(3));
        assert_eq!(3_usize, stats.samples);
        assert_float_eq!(stats.avg, 2.2, rmax <= f64::EPSILON);
        assert_float_eq!(stats.med, 2.2, rmax <= f64::EPSILON);
        assert_float_eq!(stats.min, 1.1, rmax <= f64::EPSILON);
        assert_float_eq!(stats.max, 3.3, rmax <= f64::EPSILON);
        assert_float_eq!(stats.var, 0.8066, abs <= 0.0001);
        assert_float_eq!(stats.std, 0.8981, abs <= 0.0001);
    }

    #[test]
    fn median_even_and_odd() {
        assert_float_eq!(median(&[3.0, 1.0, 2.0]), 2.0, abs <= 0.0);
        assert_float_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5, abs <= 0.0);
        assert_float_eq!(median(&SEATTLE), 192.5, abs <= 0.0);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn population_deviation() {
        assert_float_eq!(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0, abs <= 1e-12);
        assert_float_eq!(std_dev(&[5.0; 4]), 0.0, abs <= 0.0);
    }

    #[test]
    fn pearson_correlation() {
        let r = pearson(&SEATTLE, &CHICAGO).unwrap();
        assert_float_eq!(r, 0.977852, abs <= 0.000001);
        let r = pearson(&[1.0, 2.0, 3.0], &[6.0, 4.0, 2.0]).unwrap();
        assert_float_eq!(r, -1.0, abs <= 1e-12);
    }

    #[test]
    fn pearson_bad_input() {
        assert_eq!(pearson(&[], &[]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[1.0]), None);
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).unwrap().is_nan());
    }

    #[test]
    fn skew_values() {
        assert_float_eq!(skew(&SEATTLE), -0.141366, abs <= 0.000001);
        assert_float_eq!(skew(&CHICAGO), 0.063584, abs <= 0.000001);
        assert_float_eq!(
            Stats::new(&SEATTLE, None).skew(),
            skew(&SEATTLE),
            abs <= 1e-12
        );
    }

    #[test]
    fn skew_of_constant_sample_is_zero() {
        assert_eq!(skew(&[7.0; 12]), 0.0);
        assert_eq!(Stats::new(&[7.0; 12], None).skew(), 0.0);
        assert_eq!(skew(&[f64::NAN, 1.0]), 0.0);
    }

    #[test]
    #[serial]
    fn test_display() {
        let stats = Stats::new(&[1.1, 3.3, 2.2], Some(3));
        Paint::disable();
        let display = format!("{stats}");
        assert!(display.contains("Samples = 3"));
        assert!(display.contains("Min = 1.100"));
        assert!(display.contains("Max = 3.300"));
        assert!(display.contains("Average = 2.200"));
        assert!(display.contains("Median = 2.200"));
    }

    #[test]
    #[serial]
    fn test_big_num() {
        let stats = Stats::new(&[123456789.1234, 123456788.1234], None);
        Paint::disable();
        let display = format!("{stats}");
        assert!(display.contains("Samples = 2"));
        assert!(display.contains("Min = 123456788.123"));
        assert!(display.contains("Max = 123456789.123"));
    }
}
