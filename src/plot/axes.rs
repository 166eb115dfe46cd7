use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use yansi::Color::Blue;

use crate::format::F64Formatter;
use crate::scale::{tick_label, LinearScale, UtcScale};

fn utc_midnight(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or_default()
}

fn default_time_domain() -> (DateTime<Utc>, DateTime<Utc>) {
    (utc_midnight(2023, 1, 1), utc_midnight(2024, 1, 1))
}

/// An empty chart: a linear y-axis on the left and a time x-axis at the
/// bottom, both with labeled ticks.
#[derive(Debug, Clone, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Axes {
    /// Columns of the plotting area.
    #[builder(default = "64")]
    width: usize,
    /// Rows of the plotting area, the x-axis included.
    #[builder(default = "20")]
    height: usize,
    #[builder(default = "default_time_domain()")]
    x_domain: (DateTime<Utc>, DateTime<Utc>),
    #[builder(default = "(0.0, 100.0)")]
    y_domain: (f64, f64),
}

impl AxesBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(width) = self.width {
            if width < 8 {
                return Err(format!("Width should be at least 8, got {width}"));
            }
        }
        if let Some(height) = self.height {
            if height < 2 {
                return Err(format!("Height should be at least 2, got {height}"));
            }
        }
        if let Some((from, to)) = self.x_domain {
            if from >= to {
                return Err(format!("Empty time domain: {from} .. {to}"));
            }
        }
        if let Some((min, max)) = self.y_domain {
            if !min.is_finite() || !max.is_finite() || !(max - min).is_finite() {
                return Err(format!("Value domain out of range: {min} .. {max}"));
            }
            if min >= max {
                return Err(format!("Empty value domain: {min} .. {max}"));
            }
        }
        Ok(())
    }
}

impl Axes {
    fn x_scale(&self) -> UtcScale {
        UtcScale::new(self.x_domain, (0.0, (self.width - 1) as f64))
    }

    fn y_scale(&self) -> LinearScale {
        LinearScale::new(self.y_domain, ((self.height - 1) as f64, 0.0))
    }

    /// Label of every row that holds a y tick.
    fn y_labels(&self) -> Vec<Option<String>> {
        let scale = self.y_scale();
        let count = (self.height / 2).clamp(2, 10);
        let formatter = F64Formatter::new(scale.tick_decimals(count));
        let mut labels = vec![None; self.height];
        for tick in scale.ticks(count) {
            let row = scale.apply(tick).round();
            if row >= 0.0 && (row as usize) < self.height {
                labels[row as usize].get_or_insert_with(|| formatter.format(tick));
            }
        }
        labels
    }

    /// Column and label of every x tick.
    fn x_ticks(&self) -> Vec<(usize, String)> {
        let scale = self.x_scale();
        scale
            .ticks((self.width / 6).max(2))
            .into_iter()
            .map(|t| (scale.apply(t).round(), tick_label(t)))
            .filter(|(col, _)| *col >= 0.0 && (*col as usize) < self.width)
            .map(|(col, label)| (col as usize, label))
            .collect()
    }
}

impl fmt::Display for Axes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let y_labels = self.y_labels();
        let x_ticks = self.x_ticks();
        let label_width = y_labels.iter().flatten().map(|l| l.len()).max().unwrap_or(0);
        let bottom = self.height - 1;

        for (row, label) in y_labels.iter().enumerate() {
            let axis = match (row == bottom, label.is_some()) {
                (true, _) => '└',
                (false, true) => '┤',
                (false, false) => '│',
            };
            let label = format!("{:>width$}", label.as_deref().unwrap_or(""), width = label_width);
            if row == bottom {
                let mut ruler = vec!['─'; self.width];
                for (col, _) in x_ticks.iter() {
                    ruler[*col] = '┬';
                }
                let ruler: String = ruler.into_iter().collect();
                writeln!(f, "{} {}{}", Blue.paint(label), axis, ruler)?;
            } else {
                writeln!(f, "{} {}", Blue.paint(label), axis)?;
            }
        }

        // Labels are centered on their tick, and skipped if they would touch
        // the previous one
        let offset = label_width + 2;
        let mut line = vec![' '; offset + self.width + 4];
        let mut free = 0;
        for (col, label) in x_ticks.iter() {
            let len = label.chars().count();
            let start = (offset + col).saturating_sub(len / 2);
            if start < free {
                debug!("Skipping overlapping x label '{}'", label);
                continue;
            }
            if start + len > line.len() {
                line.resize(start + len, ' ');
            }
            for (i, c) in label.chars().enumerate() {
                line[start + i] = c;
            }
            free = start + len + 1;
        }
        let line: String = line.into_iter().collect();
        writeln!(f, "{}", Blue.paint(line.trim_end()))
    }
}
