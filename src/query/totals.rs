//! Group-and-sum queries that collapse the year axis (or pick one year).

use std::collections::HashMap;

use crate::domain::{NameCount, Sex, UnifiedTable};

/// Per-sex totals for one year. Both sexes are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SexDistribution {
    pub female: u64,
    pub male: u64,
}

impl SexDistribution {
    pub fn get(&self, sex: Sex) -> u64 {
        match sex {
            Sex::F => self.female,
            Sex::M => self.male,
        }
    }

    pub fn total(&self) -> u64 {
        self.female + self.male
    }

    /// `(sex, total)` pairs in `F`, `M` order.
    pub fn entries(&self) -> [(Sex, u64); 2] {
        [(Sex::F, self.female), (Sex::M, self.male)]
    }
}

/// Totals for a requested list of names, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameTotals {
    entries: Vec<NameCount>,
}

impl NameTotals {
    pub fn get(&self, name: &str) -> Option<u64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.total)
    }

    pub fn entries(&self) -> &[NameCount] {
        &self.entries
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.total).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sum of counts by sex over the rows of `year`.
pub fn sex_distribution(table: &UnifiedTable, year: i32) -> SexDistribution {
    let mut out = SexDistribution::default();
    for r in table.records().iter().filter(|r| r.year == year) {
        match r.sex {
            Sex::F => out.female += r.count,
            Sex::M => out.male += r.count,
        }
    }
    out
}

/// The `n` most frequent names in `year`, counts summed across sexes.
pub fn top_names_for_year(table: &UnifiedTable, year: i32, n: usize) -> Vec<NameCount> {
    let totals = sum_by_name(table.records().iter().filter(|r| r.year == year));
    rank(totals, n)
}

/// The `n` most frequent names across every year.
pub fn overall_top_names(table: &UnifiedTable, n: usize) -> Vec<NameCount> {
    let totals = sum_by_name(table.records().iter());
    rank(totals, n)
}

/// Totals for each requested name across every year.
///
/// Names with no rows map to 0. A name listed twice appears once, at its
/// first position.
pub fn name_totals(table: &UnifiedTable, names: &[String]) -> NameTotals {
    let mut entries: Vec<NameCount> = Vec::with_capacity(names.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(names.len());
    for name in names {
        if !index.contains_key(name.as_str()) {
            index.insert(name.as_str(), entries.len());
            entries.push(NameCount::new(name.clone(), 0));
        }
    }

    for r in table.records() {
        if let Some(&idx) = index.get(r.name.as_str()) {
            entries[idx].total += r.count;
        }
    }

    NameTotals { entries }
}

fn sum_by_name<'a>(records: impl Iterator<Item = &'a crate::domain::Record>) -> HashMap<&'a str, u64> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for r in records {
        *totals.entry(r.name.as_str()).or_insert(0) += r.count;
    }
    totals
}

/// Sort by total descending, then name ascending, and keep the first `n`.
fn rank(totals: HashMap<&str, u64>, n: usize) -> Vec<NameCount> {
    let mut sorted: Vec<(&str, u64)> = totals.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    sorted
        .into_iter()
        .take(n)
        .map(|(name, total)| NameCount::new(name, total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;

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
    fn sex_distribution_for_one_year() {
        let dist = sex_distribution(&scenario(), 1900);
        assert_eq!(dist.get(Sex::F), 100);
        assert_eq!(dist.get(Sex::M), 90);
        assert_eq!(dist.total(), 190);
    }

    #[test]
    fn sex_distribution_for_missing_year_is_zero() {
        let dist = sex_distribution(&scenario(), 1950);
        assert_eq!(dist, SexDistribution::default());
    }

    #[test]
    fn name_totals_span_all_years() {
        let totals = name_totals(&scenario(), &names(&["Mary"]));
        assert_eq!(totals.get("Mary"), Some(220));
        assert_eq!(totals.len(), 1);
    }

    #[test]
    fn name_totals_keep_absent_names() {
        let totals = name_totals(&scenario(), &names(&["Bob", "Mary", "Bob"]));
        assert_eq!(totals.entries(), &[NameCount::new("Bob", 0), NameCount::new("Mary", 220)]);
        assert_eq!(totals.total(), 220);
    }

    #[test]
    fn duplicate_rows_are_summed_not_overwritten() {
        let table = UnifiedTable::from_records(vec![
            Record::new("Ann", Sex::F, 5, 1900),
            Record::new("Ann", Sex::F, 5, 1900),
            Record::new("Ann", Sex::M, 1, 1900),
        ]);
        assert_eq!(name_totals(&table, &names(&["Ann"])).get("Ann"), Some(11));
        assert_eq!(sex_distribution(&table, 1900).female, 10);
        assert_eq!(top_names_for_year(&table, 1900, 10), vec![NameCount::new("Ann", 11)]);
    }

    #[test]
    fn top_names_break_ties_by_name() {
        let table = UnifiedTable::from_records(vec![
            Record::new("Zoe", Sex::F, 10, 2000),
            Record::new("Amy", Sex::F, 10, 2000),
            Record::new("Max", Sex::M, 20, 2000),
            Record::new("Eve", Sex::F, 1, 2000),
            Record::new("Zed", Sex::M, 99, 1999),
        ]);
        let top = top_names_for_year(&table, 2000, 3);
        assert_eq!(
            top,
            vec![
                NameCount::new("Max", 20),
                NameCount::new("Amy", 10),
                NameCount::new("Zoe", 10),
            ]
        );
    }

    #[test]
    fn overall_top_names_cover_every_year() {
        let top = overall_top_names(&scenario(), 10);
        assert_eq!(top, vec![NameCount::new("Mary", 220), NameCount::new("John", 90)]);
        assert_eq!(overall_top_names(&scenario(), 1).len(), 1);
        assert!(overall_top_names(&UnifiedTable::default(), 10).is_empty());
    }
}
