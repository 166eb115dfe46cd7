use std::fmt;
use std::ops::Range;

use yansi::Color::{Blue, Green, Red};
use yansi::Paint;

// Units-based suffixes for human formatting.
const UNITS: &[&str] = &["", " K", " M", " G", " T", " P", " E", " Z", " Y"];
pub static BAR_CHAR: &str = "∎";

#[derive(Debug)]
pub struct F64Formatter {
    /// Decimals digits to be used
    decimals: usize,
    /// Number of times the value will be divided by 1000
    divisor: u8,
    /// Suffix (typically units) to be printed after number
    suffix: &'static str,
}

impl F64Formatter {
    /// Initializes a new `F64Formatter` with a fixed amount of decimals.
    pub fn new(decimals: usize) -> F64Formatter {
        F64Formatter {
            decimals,
            divisor: 0,
            suffix: UNITS[0],
        }
    }

    /// Initializes a new `F64Formatter` for formatting numbers in the provided
    /// range, picking units and decimals so that the range is readable.
    pub fn new_with_range(range: Range<f64>) -> F64Formatter {
        let difference = range.end - range.start;
        if difference == 0.0 || !difference.is_finite() {
            return F64Formatter::new(3);
        }
        let log = difference.abs().log10() as i64;
        if log <= 0 {
            return F64Formatter::new((-log as usize).min(8) + 3);
        }
        let divisor = ((log - 1) / 3).min(5) as u8;
        F64Formatter {
            decimals: log.rem_euclid(3) as usize,
            divisor,
            suffix: UNITS[divisor as usize],
        }
    }

    pub fn format(&self, number: f64) -> String {
        format!(
            "{:.*}{}",
            self.decimals,
            number / 1000_usize.pow(self.divisor.into()) as f64,
            self.suffix
        )
    }
}

pub struct HorizontalScale {
    /// How many units are represented by a char
    scale: usize,
}

impl HorizontalScale {
    pub fn new(scale: usize) -> HorizontalScale {
        HorizontalScale {
            scale: 1.max(scale),
        }
    }

    pub fn get_bar(&self, units: usize) -> Paint<String> {
        Red.paint(format!("{:∎<width$}", "", width = units / self.scale))
    }

    pub fn get_count(&self, units: usize, width: usize) -> Paint<String> {
        Green.paint(format!("{:width$}", units, width = width))
    }

    pub fn get_scale(&self) -> usize {
        self.scale
    }
}

impl fmt::Display for HorizontalScale {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            formatter,
            "Each {} represents a count of {}",
            Red.paint(BAR_CHAR),
            Blue.paint(self.scale.to_string()),
        )
    }
}

/// A single value of a printed table.  Text is left aligned, numbers are
/// right aligned.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Number(f64),
}

impl Cell {
    fn render(&self, formatter: &F64Formatter) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Integer(n) => n.to_string(),
            Cell::Number(n) => formatter.format(*n),
        }
    }

    fn is_text(&self) -> bool {
        matches!(self, Cell::Text(_))
    }
}

/// A row type that knows how to be laid out as a table line.
pub trait Record {
    /// Column names, in display order.
    fn header() -> &'static [&'static str];
    /// One cell per column of `header`.
    fn cells(&self) -> Vec<Cell>;
}

/// A printable table of records, in the spirit of a data frame `print`.
pub struct Grid<'a, R: Record> {
    records: &'a [R],
    formatter: F64Formatter,
}

impl<'a, R: Record> Grid<'a, R> {
    /// `precision` is the number of decimals of non integer numbers (3 if
    /// "None" is used).
    pub fn new(records: &'a [R], precision: Option<usize>) -> Self {
        Self {
            records,
            formatter: F64Formatter::new(precision.unwrap_or(3)),
        }
    }
}

impl<'a, R: Record> fmt::Display for Grid<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let header = R::header();
        let rows: Vec<Vec<Cell>> = self.records.iter().map(|r| r.cells()).collect();
        let rendered: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|c| c.render(&self.formatter)).collect())
            .collect();
        let widths: Vec<usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| {
                rendered
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|s| s.chars().count())
                    .fold(name.len(), usize::max)
            })
            .collect();
        // Alignment of a column follows the kind of its first cell
        let left: Vec<bool> = (0..header.len())
            .map(|i| rows.first().and_then(|row| row.get(i)).map_or(true, Cell::is_text))
            .collect();

        let line: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(i, name)| pad(name, widths[i], left[i]))
            .collect();
        writeln!(f, "{}", Blue.paint(line.join("  ")).bold())?;
        for row in rendered.iter() {
            let line: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, s)| pad(s, widths[i], left[i]))
                .collect();
            writeln!(f, "{}", line.join("  ").trim_end())?;
        }
        writeln!(
            f,
            "{}",
            Green.paint(format!("{} rows", self.records.len())).dimmed()
        )
    }
}

fn pad(s: &str, width: usize, left: bool) -> String {
    if left {
        format!("{:<width$}", s, width = width)
    } else {
        format!("{:>width$}", s, width = width)
    }
}
