use std::collections::HashMap;

use crate::stats::Stats;
use crate::table::{FoldedRow, GroupStats};

/// Groups folded rows by city and summarizes every group.
///
/// Groups are returned in the order their city first shows up.
pub fn rollup(rows: &[FoldedRow]) -> Vec<GroupStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();
    for row in rows {
        let slot = *index.entry(row.city.as_str()).or_insert_with(|| {
            groups.push((row.city.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(row.sun);
    }
    groups
        .into_iter()
        .map(|(city, values)| {
            let stats = Stats::new(&values, None);
            debug!("Group {} holds {} values", city, stats.samples);
            GroupStats {
                city: city.to_string(),
                min: stats.min,
                max: stats.max,
                avg: stats.avg,
                med: stats.med,
                skew: stats.skew(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Series, Table, CHICAGO, SAN_FRANCISCO, SEATTLE};
    use float_eq::assert_float_eq;

    #[test]
    fn sunshine_rollup() {
        let stats = rollup(&Table::sunshine().fold());
        assert_eq!(stats.len(), 3);

        assert_eq!(stats[0].city, SEATTLE);
        assert_float_eq!(stats[0].min, 52.0, abs <= 0.0);
        assert_float_eq!(stats[0].max, 312.0, abs <= 0.0);
        assert_float_eq!(stats[0].avg, 180.25, abs <= 1e-12);
        assert_float_eq!(stats[0].med, 192.5, abs <= 0.0);
        assert_float_eq!(stats[0].skew, -0.141366, abs <= 0.000001);

        assert_eq!(stats[1].city, CHICAGO);
        assert_float_eq!(stats[1].min, 106.0, abs <= 0.0);
        assert_float_eq!(stats[1].max, 318.0, abs <= 0.0);
        assert_float_eq!(stats[1].avg, 208.666667, abs <= 0.000001);
        assert_float_eq!(stats[1].med, 204.0, abs <= 0.0);
        assert_float_eq!(stats[1].skew, 0.063584, abs <= 0.000001);

        assert_eq!(stats[2].city, SAN_FRANCISCO);
        assert_float_eq!(stats[2].min, 156.0, abs <= 0.0);
        assert_float_eq!(stats[2].max, 330.0, abs <= 0.0);
        assert_float_eq!(stats[2].avg, 245.833333, abs <= 0.000001);
        assert_float_eq!(stats[2].med, 259.0, abs <= 0.0);
        assert_float_eq!(stats[2].skew, -0.231025, abs <= 0.000001);
    }

    #[test]
    fn stats_are_bounded() {
        for group in rollup(&Table::sunshine().fold()) {
            assert!(group.min <= group.med && group.med <= group.max);
            assert!(group.min <= group.avg && group.avg <= group.max);
        }
    }

    #[test]
    fn constant_group_has_zero_skew() {
        let table = Table::new(vec![
            Series::new(SEATTLE, &[150.0; 12]),
            Series::new(CHICAGO, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 100.0]),
        ])
        .unwrap();
        let stats = rollup(&table.fold());
        assert_eq!(stats[0].skew, 0.0);
        assert_float_eq!(stats[0].avg, 150.0, abs <= 0.0);
        assert!(stats[1].skew > 0.0);
    }

    #[test]
    fn groups_follow_first_appearance() {
        let rows = vec![
            FoldedRow::new("b", 1.0),
            FoldedRow::new("a", 2.0),
            FoldedRow::new("b", 3.0),
        ];
        let stats = rollup(&rows);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].city, "b");
        assert_float_eq!(stats[0].avg, 2.0, abs <= 0.0);
        assert_eq!(stats[1].city, "a");
        assert_eq!(stats[1].skew, 0.0);
    }

    #[test]
    fn empty_rollup() {
        assert!(rollup(&[]).is_empty());
    }
}
