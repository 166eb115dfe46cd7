use crate::format::{Cell, Record};

/// Difference between two series at a given (1-based) row.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffRow {
    pub month: usize,
    pub diff: f64,
}

/// Correlation of Seattle with San Francisco and with Chicago.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    pub corr_sf: f64,
    pub corr_chi: f64,
}

/// A single value of a folded table.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldedRow {
    pub city: String,
    pub sun: f64,
}

impl FoldedRow {
    pub fn new(city: &str, sun: f64) -> Self {
        Self {
            city: city.to_string(),
            sun,
        }
    }
}

/// Summary of the values of a city.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub city: String,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub med: f64,
    /// `(avg - med) / std`, or 0 when that is not a finite number
    pub skew: f64,
}

impl Record for DiffRow {
    fn header() -> &'static [&'static str] {
        &["month", "diff"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::Integer(self.month as i64), Cell::Number(self.diff)]
    }
}

impl Record for Correlation {
    fn header() -> &'static [&'static str] {
        &["corr_sf", "corr_chi"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::Number(self.corr_sf), Cell::Number(self.corr_chi)]
    }
}

impl Record for FoldedRow {
    fn header() -> &'static [&'static str] {
        &["city", "sun"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::Text(self.city.clone()), Cell::Number(self.sun)]
    }
}

impl Record for GroupStats {
    fn header() -> &'static [&'static str] {
        &["city", "min", "max", "avg", "med", "skew"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.city.clone()),
            Cell::Number(self.min),
            Cell::Number(self.max),
            Cell::Number(self.avg),
            Cell::Number(self.med),
            Cell::Number(self.skew),
        ]
    }
}
