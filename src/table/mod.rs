//! Named numeric series sharing a row index, and the aggregations run over
//! them: sorted differences, correlations, folding and per-group rollups.

pub use self::rollup::rollup;
pub use self::rows::{Correlation, DiffRow, FoldedRow, GroupStats};
pub use crate::format::{Cell, Grid, Record};

mod rollup;
mod rows;

use std::collections::HashSet;

use crate::errors::TableError;
use crate::stats;

pub const SEATTLE: &str = "Seattle";
pub const CHICAGO: &str = "Chicago";
pub const SAN_FRANCISCO: &str = "San Francisco";

// Average hours of sunshine per month, from https://usclimatedata.com/
const SEATTLE_SUN: [f64; 12] = [
    69.0, 108.0, 178.0, 207.0, 253.0, 268.0, 312.0, 281.0, 221.0, 142.0, 72.0, 52.0,
];
const CHICAGO_SUN: [f64; 12] = [
    135.0, 136.0, 187.0, 215.0, 281.0, 311.0, 318.0, 283.0, 226.0, 193.0, 113.0, 106.0,
];
const SAN_FRANCISCO_SUN: [f64; 12] = [
    165.0, 182.0, 251.0, 281.0, 314.0, 330.0, 300.0, 272.0, 267.0, 243.0, 189.0, 156.0,
];

/// A named column of numerical values.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: &str, values: &[f64]) -> Self {
        Self {
            name: name.to_string(),
            values: values.to_vec(),
        }
    }
}

/// Columns of equal length, kept in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    series: Vec<Series>,
}

impl Table {
    /// Creates a table, checking that there is at least a series, that names
    /// are unique and that every series has the length of the first one.
    pub fn new(series: Vec<Series>) -> Result<Self, TableError> {
        let expected = match series.first() {
            Some(first) => first.values.len(),
            None => return Err(TableError::Empty),
        };
        let mut names = HashSet::new();
        for s in series.iter() {
            if !names.insert(s.name.as_str()) {
                return Err(TableError::DuplicateSeries(s.name.clone()));
            }
            if s.values.len() != expected {
                return Err(TableError::LengthMismatch {
                    name: s.name.clone(),
                    expected,
                    found: s.values.len(),
                });
            }
        }
        Ok(Self { series })
    }

    /// Monthly sunshine hours of Seattle, Chicago and San Francisco.
    pub fn sunshine() -> Self {
        Self {
            series: vec![
                Series::new(SEATTLE, &SEATTLE_SUN),
                Series::new(CHICAGO, &CHICAGO_SUN),
                Series::new(SAN_FRANCISCO, &SAN_FRANCISCO_SUN),
            ],
        }
    }

    /// Amount of rows (the common length of every series).
    pub fn rows(&self) -> usize {
        self.series.first().map_or(0, |s| s.values.len())
    }

    pub fn names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn column(&self, name: &str) -> Result<&[f64], TableError> {
        self.series
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.values.as_slice())
            .ok_or_else(|| TableError::UnknownSeries(name.to_string()))
    }

    /// One row per position with its 1-based `month` and `left - right`,
    /// sorted by descending difference.  Ties keep their original order.
    pub fn differences(&self, left: &str, right: &str) -> Result<Vec<DiffRow>, TableError> {
        let (left, right) = (self.column(left)?, self.column(right)?);
        let mut rows: Vec<DiffRow> = left
            .iter()
            .zip(right.iter())
            .enumerate()
            .map(|(i, (l, r))| DiffRow {
                month: i + 1,
                diff: l - r,
            })
            .collect();
        // sort_by is stable
        rows.sort_by(|a, b| b.diff.total_cmp(&a.diff));
        Ok(rows)
    }

    /// Pearson correlation of Seattle with San Francisco and with Chicago.
    pub fn correlations(&self) -> Result<Correlation, TableError> {
        let seattle = self.column(SEATTLE)?;
        Ok(Correlation {
            corr_sf: self.correlation(seattle, SAN_FRANCISCO)?,
            corr_chi: self.correlation(seattle, CHICAGO)?,
        })
    }

    fn correlation(&self, base: &[f64], other: &str) -> Result<f64, TableError> {
        // Lengths are checked on construction, so pearson can only fail on
        // an empty table
        Ok(stats::pearson(base, self.column(other)?).unwrap_or(f64::NAN))
    }

    /// Reshapes the table into `(city, sun)` pairs.  Rows are emitted in row
    /// order and, inside a row, in column order.
    pub fn fold(&self) -> Vec<FoldedRow> {
        let mut folded = Vec::with_capacity(self.rows() * self.series.len());
        for i in 0..self.rows() {
            for s in self.series.iter() {
                folded.push(FoldedRow {
                    city: s.name.clone(),
                    sun: s.values[i],
                });
            }
        }
        folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn diffs(rows: &[DiffRow]) -> Vec<(usize, f64)> {
        rows.iter().map(|r| (r.month, r.diff)).collect()
    }

    #[test]
    fn builtin_table() {
        let table = Table::sunshine();
        assert_eq!(table.rows(), 12);
        assert_eq!(table.names(), vec![SEATTLE, CHICAGO, SAN_FRANCISCO]);
        assert_eq!(Table::new(table.series().to_vec()), Ok(table));
    }

    #[test]
    fn invalid_tables() {
        assert_eq!(Table::new(vec![]), Err(TableError::Empty));
        assert_eq!(
            Table::new(vec![Series::new("a", &[1.0, 2.0]), Series::new("b", &[1.0])]),
            Err(TableError::LengthMismatch {
                name: "b".to_string(),
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Table::new(vec![Series::new("a", &[1.0]), Series::new("a", &[1.0])]),
            Err(TableError::DuplicateSeries("a".to_string()))
        );
        assert_eq!(
            Table::sunshine().column("Boston"),
            Err(TableError::UnknownSeries("Boston".to_string()))
        );
    }

    #[test]
    fn sorted_differences() {
        let rows = Table::sunshine().differences(SEATTLE, CHICAGO).unwrap();
        assert_eq!(
            diffs(&rows),
            vec![
                (8, -2.0),
                (9, -5.0),
                (7, -6.0),
                (4, -8.0),
                (3, -9.0),
                (2, -28.0),
                (5, -28.0),
                (11, -41.0),
                (6, -43.0),
                (10, -51.0),
                (12, -54.0),
                (1, -66.0)
            ]
        );
    }

    #[test]
    fn differences_keep_order_on_ties() {
        let table = Table::new(vec![
            Series::new(SEATTLE, &[1.0; 12]),
            Series::new(CHICAGO, &[0.0; 12]),
        ])
        .unwrap();
        let rows = table.differences(SEATTLE, CHICAGO).unwrap();
        let expected: Vec<(usize, f64)> = (1..=12).map(|m| (m, 1.0)).collect();
        assert_eq!(diffs(&rows), expected);
    }

    #[test]
    fn differences_unknown_series() {
        assert_eq!(
            Table::sunshine().differences(SEATTLE, "Boston"),
            Err(TableError::UnknownSeries("Boston".to_string()))
        );
    }

    #[test]
    fn correlations() {
        let corr = Table::sunshine().correlations().unwrap();
        assert_float_eq!(corr.corr_sf, 0.933039, abs <= 0.000001);
        assert_float_eq!(corr.corr_chi, 0.977852, abs <= 0.000001);
        assert!((-1.0..=1.0).contains(&corr.corr_sf));
        assert!((-1.0..=1.0).contains(&corr.corr_chi));
    }

    #[test]
    fn correlations_need_the_three_cities() {
        let table = Table::new(vec![
            Series::new(SEATTLE, &[1.0, 2.0]),
            Series::new(CHICAGO, &[2.0, 1.0]),
        ])
        .unwrap();
        assert_eq!(
            table.correlations(),
            Err(TableError::UnknownSeries(SAN_FRANCISCO.to_string()))
        );
    }

    #[test]
    fn correlations_without_variance_are_nan() {
        let table = Table::new(vec![
            Series::new(SEATTLE, &[1.0, 1.0, 1.0]),
            Series::new(CHICAGO, &[2.0, 1.0, 3.0]),
            Series::new(SAN_FRANCISCO, &[2.0, 1.0, 3.0]),
        ])
        .unwrap();
        let corr = table.correlations().unwrap();
        assert!(corr.corr_sf.is_nan());
        assert!(corr.corr_chi.is_nan());
    }

    #[test]
    fn fold_is_row_major() {
        let table = Table::sunshine();
        let folded = table.fold();
        assert_eq!(folded.len(), 36);
        assert_eq!(folded[0], FoldedRow::new(SEATTLE, 69.0));
        assert_eq!(folded[1], FoldedRow::new(CHICAGO, 135.0));
        assert_eq!(folded[2], FoldedRow::new(SAN_FRANCISCO, 165.0));
        assert_eq!(folded[35], FoldedRow::new(SAN_FRANCISCO, 156.0));
        for s in table.series() {
            let values: Vec<f64> = folded
                .iter()
                .filter(|r| r.city == s.name)
                .map(|r| r.sun)
                .collect();
            assert_eq!(values, s.values);
        }
    }

    #[test]
    fn pipeline_is_idempotent() {
        let table = Table::sunshine();
        let first = (
            table.differences(SEATTLE, CHICAGO).unwrap(),
            table.correlations().unwrap(),
            rollup(&table.fold()),
        );
        let second = (
            table.differences(SEATTLE, CHICAGO).unwrap(),
            table.correlations().unwrap(),
            rollup(&table.fold()),
        );
        assert_eq!(first, second);
        assert_eq!(first.1.corr_sf.to_bits(), second.1.corr_sf.to_bits());
    }
}
