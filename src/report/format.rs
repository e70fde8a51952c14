//! Formatted terminal output for the text view.
//!
//! We keep formatting code in one place so:
//! - the query code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::app::pipeline::ChartSet;
use crate::domain::NameCount;
use crate::plot::{Series, render_bar_chart, render_line_plot};

const BAR_WIDTH: usize = 40;
const PLOT_WIDTH: usize = 100;
const PLOT_HEIGHT: usize = 20;

/// Format every figure of a run, in order.
pub fn format_chart_set(charts: &ChartSet) -> String {
    let mut out = String::new();
    let range = charts.trend_range;

    out.push_str(&heading(&format!("Sex distribution in {}", charts.year)));
    let sex_rows: Vec<(String, u64)> = charts
        .sex
        .entries()
        .iter()
        .map(|(sex, total)| (sex.to_string(), *total))
        .collect();
    out.push_str(&format_share_table(&sex_rows));

    out.push_str(&heading(&format!("Most popular names in {}", charts.year)));
    out.push_str(&format_share_table(&name_rows(&charts.top_for_year)));

    out.push_str(&heading("Total babies with the selected names"));
    out.push_str(&format_share_table(&name_rows(charts.name_totals.entries())));

    let columns: Vec<(String, Vec<(i32, u64)>)> = charts
        .trend
        .names()
        .iter()
        .filter_map(|name| charts.trend.column(name).map(|c| (name.clone(), c)))
        .collect();
    let name_series: Vec<Series<'_>> = columns
        .iter()
        .map(|(name, points)| Series {
            label: name,
            points,
        })
        .collect();

    out.push_str(&heading("Babies with the selected names"));
    out.push_str(&render_line_plot(&name_series, PLOT_WIDTH / 2, PLOT_HEIGHT));

    let total_points: Vec<(i32, u64)> = charts.trend_total.iter().map(|t| (t.year, t.total)).collect();
    out.push_str(&heading(&format!(
        "Total babies with the selected names ({}-{})",
        range.start, range.end
    )));
    out.push_str(&render_line_plot(
        &[Series {
            label: "Total",
            points: &total_points,
        }],
        PLOT_WIDTH / 2,
        PLOT_HEIGHT,
    ));

    out.push_str(&heading(&format!("Name trends {}-{}", range.start, range.end)));
    out.push_str(&render_line_plot(&name_series, PLOT_WIDTH, PLOT_HEIGHT));

    out.push_str(&heading(&format!(
        "Top {} most popular names ({}-{})",
        charts.top_n, range.start, range.end
    )));
    out.push_str(&render_bar_chart(&name_rows(&charts.overall_top), BAR_WIDTH));

    out
}

/// Table of `label  value  share%` rows (the text stand-in for a pie chart).
pub fn format_share_table(rows: &[(String, u64)]) -> String {
    let total: u64 = rows.iter().map(|(_, v)| *v).sum();
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.to_string().len()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!(
            "{label:<label_width$}  {value:>value_width$}  {:>5.1}%\n",
            share_pct(*value, total)
        ));
    }
    if rows.is_empty() || total == 0 {
        out.push_str("(no data)\n");
    }
    out
}

pub fn share_pct(value: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        value as f64 * 100.0 / total as f64
    }
}

fn name_rows(entries: &[NameCount]) -> Vec<(String, u64)> {
    entries.iter().map(|e| (e.name.clone(), e.total)).collect()
}

fn heading(title: &str) -> String {
    format!("\n=== {title} ===\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::build_chart_set;
    use crate::domain::{Record, RunConfig, Sex, UnifiedTable, YearRange};

    #[test]
    fn share_table_golden_snapshot() {
        let rows = vec![("F".to_string(), 100), ("M".to_string(), 90)];
        let expected = concat!("F  100   52.6%\n", "M   90   47.4%\n");
        assert_eq!(format_share_table(&rows), expected);
    }

    #[test]
    fn share_table_marks_empty_data() {
        let rows = vec![("F".to_string(), 0), ("M".to_string(), 0)];
        assert!(format_share_table(&rows).ends_with("(no data)\n"));
    }

    #[test]
    fn chart_set_lists_every_figure() {
        let table = UnifiedTable::from_records(vec![
            Record::new("Mary", Sex::F, 100, 1900),
            Record::new("John", Sex::M, 90, 1900),
            Record::new("Mary", Sex::F, 120, 1901),
        ]);
        let config = RunConfig {
            names: vec!["Mary".to_string()],
            trend_range: YearRange::new(1900, 1901),
            ..RunConfig::default()
        };
        let txt = format_chart_set(&build_chart_set(&table, 1900, &config));

        assert!(txt.contains("=== Sex distribution in 1900 ==="));
        assert!(txt.contains("=== Most popular names in 1900 ==="));
        assert!(txt.contains("=== Total babies with the selected names ==="));
        assert!(txt.contains("=== Name trends 1900-1901 ==="));
        assert!(txt.contains("=== Top 10 most popular names (1900-1901) ==="));
        assert!(txt.contains("Mary  220  100.0%"));
        assert!(txt.contains("* Mary"));
    }
}
