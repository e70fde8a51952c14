//! Year x name pivot used by the trend charts.

use std::collections::HashMap;

use crate::domain::{UnifiedTable, YearRange, YearTotal};

/// Dense table of summed counts: one row per year, one column per name.
///
/// Every year of the range and every requested name has a value, 0 when no
/// record matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearNameMatrix {
    range: YearRange,
    names: Vec<String>,
    /// `counts[year_idx][name_idx]`
    counts: Vec<Vec<u64>>,
}

impl YearNameMatrix {
    pub fn range(&self) -> YearRange {
        self.range
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.range.iter()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, year: i32, name: &str) -> Option<u64> {
        let row = self.row_index(year)?;
        let col = self.names.iter().position(|n| n == name)?;
        Some(self.counts[row][col])
    }

    /// Counts for one year, in column order.
    pub fn row(&self, year: i32) -> Option<&[u64]> {
        self.row_index(year).map(|idx| self.counts[idx].as_slice())
    }

    /// `(year, count)` series for one name.
    pub fn column(&self, name: &str) -> Option<Vec<(i32, u64)>> {
        let col = self.names.iter().position(|n| n == name)?;
        Some(
            self.years()
                .zip(self.counts.iter())
                .map(|(year, row)| (year, row[col]))
                .collect(),
        )
    }

    pub fn max_value(&self) -> u64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    fn row_index(&self, year: i32) -> Option<usize> {
        if self.range.contains(year) {
            Some((year - self.range.start) as usize)
        } else {
            None
        }
    }
}

/// Sum counts by `(year, name)` for the requested names, zero-filled over `range`.
///
/// Rows outside `range` are ignored. A name listed twice gets one column.
pub fn year_by_name_matrix(table: &UnifiedTable, names: &[String], range: YearRange) -> YearNameMatrix {
    let mut columns: Vec<String> = Vec::with_capacity(names.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(names.len());
    for name in names {
        if !index.contains_key(name.as_str()) {
            index.insert(name.as_str(), columns.len());
            columns.push(name.clone());
        }
    }

    let mut counts = vec![vec![0u64; columns.len()]; range.len()];
    for r in table.records() {
        if !range.contains(r.year) {
            continue;
        }
        if let Some(&col) = index.get(r.name.as_str()) {
            counts[(r.year - range.start) as usize][col] += r.count;
        }
    }

    YearNameMatrix {
        range,
        names: columns,
        counts,
    }
}

/// Row-wise sum of a matrix: one total per year.
pub fn total_across_names(matrix: &YearNameMatrix) -> Vec<YearTotal> {
    matrix
        .years()
        .zip(matrix.counts.iter())
        .map(|(year, row)| YearTotal {
            year,
            total: row.iter().sum(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Record, Sex};

    fn scenario() -> UnifiedTable {
        UnifiedTable::from_records(vec![
            Record::new("Mary", Sex::F, 100, 1900),
            Record::new("John", Sex::M, 90, 1900),
            Record::new("Mary", Sex::F, 120, 1901),
        ])
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matrix_matches_the_worked_example() {
        let m = year_by_name_matrix(&scenario(), &names(&["Mary"]), YearRange::new(1900, 1901));
        assert_eq!(m.get(1900, "Mary"), Some(100));
        assert_eq!(m.get(1901, "Mary"), Some(120));
        assert_eq!(m.column("Mary"), Some(vec![(1900, 100), (1901, 120)]));
    }

    #[test]
    fn matrix_is_dense_over_the_default_range() {
        let list = names(&["Mary", "Bob"]);
        let m = year_by_name_matrix(&scenario(), &list, YearRange::default());
        assert_eq!(m.years().count(), 131);
        for year in 1880..=2010 {
            for name in &list {
                assert!(m.get(year, name).is_some(), "missing {year}/{name}");
            }
        }
        assert_eq!(m.get(1880, "Mary"), Some(0));
        assert_eq!(m.get(1900, "Bob"), Some(0));
        assert_eq!(m.get(1879, "Mary"), None);
        assert_eq!(m.max_value(), 120);
    }

    #[test]
    fn rows_outside_the_range_are_dropped() {
        let table = UnifiedTable::from_records(vec![
            Record::new("Mary", Sex::F, 5, 1870),
            Record::new("Mary", Sex::F, 7, 1880),
            Record::new("Mary", Sex::M, 1, 1880),
        ]);
        let m = year_by_name_matrix(&table, &names(&["Mary"]), YearRange::new(1880, 1881));
        assert_eq!(m.row(1880), Some(&[8u64][..]));
        assert_eq!(m.row(1881), Some(&[0u64][..]));
    }

    #[test]
    fn totals_sum_each_row() {
        let table = UnifiedTable::from_records(vec![
            Record::new("Mary", Sex::F, 100, 1900),
            Record::new("John", Sex::M, 90, 1900),
            Record::new("John", Sex::M, 3, 1901),
        ]);
        let m = year_by_name_matrix(&table, &names(&["Mary", "John"]), YearRange::new(1899, 1901));
        let totals = total_across_names(&m);
        assert_eq!(
            totals,
            vec![
                YearTotal { year: 1899, total: 0 },
                YearTotal { year: 1900, total: 190 },
                YearTotal { year: 1901, total: 3 },
            ]
        );
    }

    #[test]
    fn empty_name_list_still_yields_every_year() {
        let m = year_by_name_matrix(&scenario(), &[], YearRange::new(1900, 1902));
        assert!(m.names().is_empty());
        let totals = total_across_names(&m);
        assert_eq!(totals.len(), 3);
        assert!(totals.iter().all(|t| t.total == 0));
    }
}
