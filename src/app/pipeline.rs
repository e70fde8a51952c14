//! Shared "chart pipeline" logic used by both the TUI and text front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! table + year + names -> every aggregate the figure sequence needs.
//!
//! The front-ends can then focus on presentation (widgets vs printing).

use tracing::info;

use crate::domain::{NameCount, RunConfig, UnifiedTable, YearRange, YearTotal};
use crate::query::{
    NameTotals, SexDistribution, YearNameMatrix, name_totals, overall_top_names, sex_distribution,
    top_names_for_year, total_across_names, year_by_name_matrix,
};

/// All computed aggregates for one run, in figure order.
#[derive(Debug, Clone)]
pub struct ChartSet {
    pub year: i32,
    pub top_n: usize,
    pub names: Vec<String>,
    pub trend_range: YearRange,
    /// Figure 1 (left): sex split for `year`.
    pub sex: SexDistribution,
    /// Figure 1 (right): most frequent names in `year`.
    pub top_for_year: Vec<NameCount>,
    /// Figure 2: totals for the configured names.
    pub name_totals: NameTotals,
    /// Figures 3 and 4: per-name counts by year.
    pub trend: YearNameMatrix,
    /// Figure 3 (right): the configured names summed per year.
    pub trend_total: Vec<YearTotal>,
    /// Figure 5: most frequent names across every year.
    pub overall_top: Vec<NameCount>,
}

/// Run every query for one validated year.
pub fn build_chart_set(table: &UnifiedTable, year: i32, config: &RunConfig) -> ChartSet {
    let sex = sex_distribution(table, year);
    let top_for_year = top_names_for_year(table, year, config.top_n);
    let totals = name_totals(table, &config.names);
    let trend = year_by_name_matrix(table, &config.names, config.trend_range);
    let trend_total = total_across_names(&trend);
    let overall_top = overall_top_names(table, config.top_n);

    info!(
        year,
        births = sex.total(),
        names = totals.len(),
        "computed chart aggregates"
    );

    ChartSet {
        year,
        top_n: config.top_n,
        names: trend.names().to_vec(),
        trend_range: config.trend_range,
        sex,
        top_for_year,
        name_totals: totals,
        trend,
        trend_total,
        overall_top,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Record, Sex};

    #[test]
    fn chart_set_wires_every_query() {
        let table = UnifiedTable::from_records(vec![
            Record::new("Mary", Sex::F, 100, 1900),
            Record::new("John", Sex::M, 90, 1900),
            Record::new("Mary", Sex::F, 120, 1901),
        ]);
        let config = RunConfig {
            names: vec!["Mary".to_string(), "Bob".to_string()],
            top_n: 1,
            trend_range: YearRange::new(1900, 1901),
            ..RunConfig::default()
        };

        let charts = build_chart_set(&table, 1900, &config);
        assert_eq!(charts.sex.female, 100);
        assert_eq!(charts.sex.male, 90);
        assert_eq!(charts.top_for_year, vec![NameCount::new("Mary", 100)]);
        assert_eq!(charts.name_totals.get("Bob"), Some(0));
        assert_eq!(charts.trend.get(1901, "Mary"), Some(120));
        assert_eq!(charts.trend_total.len(), 2);
        assert_eq!(charts.overall_top, vec![NameCount::new("Mary", 220)]);
    }
}
