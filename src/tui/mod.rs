//! Ratatui-based terminal UI.
//!
//! Shows the figure sequence one page at a time. Each page stays up until the
//! viewer moves on; leaving the last page ends the session.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tracing::debug;

use crate::app::pipeline::ChartSet;
use crate::domain::NameCount;
use crate::error::{AppError, EXIT_RUNTIME};
use crate::report::share_pct;

mod plotters_chart;

use plotters_chart::{
    BarPlottersChart, LinePlottersChart, LineSeriesData, PieSlice, PiePlottersChart, palette_color,
};

/// Start the TUI and block until the viewer is done.
pub fn run(charts: &ChartSet) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(charts);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                EXIT_RUNTIME,
                format!("Failed to enter alternate screen: {e}"),
            ));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Pages of the TUI, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Figure {
    YearSummary,
    NameTotals,
    Trend,
    NameTrends,
    OverallTop,
}

impl Figure {
    const ALL: [Figure; 5] = [
        Figure::YearSummary,
        Figure::NameTotals,
        Figure::Trend,
        Figure::NameTrends,
        Figure::OverallTop,
    ];

    fn title(self, charts: &ChartSet) -> String {
        let range = charts.trend_range;
        match self {
            Figure::YearSummary => format!("Births in {}", charts.year),
            Figure::NameTotals => "Total babies with the selected names".to_string(),
            Figure::Trend => format!("Selected names, {}-{}", range.start, range.end),
            Figure::NameTrends => format!("Name trends {}-{}", range.start, range.end),
            Figure::OverallTop => format!(
                "Top {} most popular names ({}-{})",
                charts.top_n, range.start, range.end
            ),
        }
    }
}

struct App<'a> {
    charts: &'a ChartSet,
    page: usize,
}

impl<'a> App<'a> {
    fn new(charts: &'a ChartSet) -> Self {
        Self { charts, page: 0 }
    }

    fn figure(&self) -> Figure {
        Figure::ALL[self.page.min(Figure::ALL.len() - 1)]
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the session should end.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right | KeyCode::Char('n') => {
                if self.page + 1 >= Figure::ALL.len() {
                    return true;
                }
                self.page += 1;
                debug!(page = self.page, "next figure");
            }
            KeyCode::Left | KeyCode::Backspace | KeyCode::Char('p') => {
                self.page = self.page.saturating_sub(1);
            }
            _ => {}
        }
        false
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled("yob", Style::default().fg(Color::Cyan)),
                Span::raw(format!(
                    " | figure {}/{}: {}",
                    self.page + 1,
                    Figure::ALL.len(),
                    self.figure().title(self.charts)
                )),
            ]),
            Line::from(Span::styled(
                format!(
                    "year: {} | names: {}",
                    self.charts.year,
                    self.charts.names.join(", ")
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let charts = self.charts;
        let range = charts.trend_range;

        match self.figure() {
            Figure::YearSummary => {
                let halves = split_horizontal(area);
                let sex = sex_slices(charts);
                let top = name_slices(&charts.top_for_year);
                draw_pie(frame, halves[0], &format!("Sex distribution in {}", charts.year), &sex);
                draw_pie(frame, halves[1], &format!("Most popular names in {}", charts.year), &top);
            }
            Figure::NameTotals => {
                let slices = name_slices(charts.name_totals.entries());
                draw_pie(frame, area, "Total babies with the selected names", &slices);
            }
            Figure::Trend => {
                let halves = split_horizontal(area);
                let names = name_series(charts);
                let total = total_series(charts);
                draw_lines(frame, halves[0], "Babies with the selected names", &names, false);
                draw_lines(
                    frame,
                    halves[1],
                    &format!("Total with the selected names ({}-{})", range.start, range.end),
                    &total,
                    false,
                );
            }
            Figure::NameTrends => {
                let names = name_series(charts);
                draw_lines(
                    frame,
                    area,
                    &format!("Name trends {}-{}", range.start, range.end),
                    &names,
                    true,
                );
            }
            Figure::OverallTop => {
                let bars: Vec<(String, f64)> = charts
                    .overall_top
                    .iter()
                    .map(|e| (e.name.clone(), e.total as f64))
                    .collect();
                let inner = framed(frame, area, &Figure::OverallTop.title(charts));
                frame.render_widget(
                    BarPlottersChart {
                        bars: &bars,
                        x_label: "babies",
                    },
                    inner,
                );
            }
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Enter/→ next  ← back  q quit";
        let p = Paragraph::new(Line::from(Span::styled(help, Style::default().fg(Color::Gray))))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn split_horizontal(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

/// Draw a titled block and return its cleared inner area.
fn framed(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str) -> Rect {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);
    inner
}

fn draw_pie(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, slices: &[PieSlice]) {
    let inner = framed(frame, area, title);
    frame.render_widget(PiePlottersChart { slices }, inner);
}

fn draw_lines(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, series: &[LineSeriesData], grid: bool) {
    let inner = framed(frame, area, title);
    let (x_bounds, y_bounds) = line_bounds(series);
    frame.render_widget(
        LinePlottersChart {
            series,
            x_bounds,
            y_bounds,
            x_label: "year",
            y_label: "babies",
            grid,
        },
        inner,
    );
}

fn sex_slices(charts: &ChartSet) -> Vec<PieSlice> {
    let total = charts.sex.total();
    charts
        .sex
        .entries()
        .iter()
        .enumerate()
        .map(|(idx, (sex, value))| PieSlice {
            label: format!("{sex} {value} ({:.1}%)", share_pct(*value, total)),
            value: *value as f64,
            color: palette_color(idx),
        })
        .collect()
}

fn name_slices(entries: &[NameCount]) -> Vec<PieSlice> {
    let total: u64 = entries.iter().map(|e| e.total).sum();
    entries
        .iter()
        .enumerate()
        .map(|(idx, e)| PieSlice {
            label: format!("{} {} ({:.1}%)", e.name, e.total, share_pct(e.total, total)),
            value: e.total as f64,
            color: palette_color(idx + 2),
        })
        .collect()
}

fn name_series(charts: &ChartSet) -> Vec<LineSeriesData> {
    charts
        .trend
        .names()
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| {
            let column = charts.trend.column(name)?;
            Some(LineSeriesData {
                label: name.clone(),
                color: palette_color(idx + 2),
                points: column.into_iter().map(|(y, c)| (y as f64, c as f64)).collect(),
            })
        })
        .collect()
}

fn total_series(charts: &ChartSet) -> Vec<LineSeriesData> {
    vec![LineSeriesData {
        label: "Total".to_string(),
        color: plotters::style::RGBColor(186, 85, 211), // purple
        points: charts
            .trend_total
            .iter()
            .map(|t| (t.year as f64, t.total as f64))
            .collect(),
    }]
}

/// X/Y bounds covering every series, with a little headroom on Y.
fn line_bounds(series: &[LineSeriesData]) -> ([f64; 2], [f64; 2]) {
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y_max = 0.0_f64;
    for &(x, y) in series.iter().flat_map(|s| s.points.iter()) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_max = y_max.max(y);
    }

    if !x_min.is_finite() || !x_max.is_finite() {
        x_min = crate::domain::MIN_YEAR as f64;
        x_max = crate::domain::MAX_YEAR as f64;
    }
    if x_max <= x_min {
        x_min -= 0.5;
        x_max += 0.5;
    }
    let y_top = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    ([x_min, x_max], [0.0, y_top])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::build_chart_set;
    use crate::domain::{Record, RunConfig, Sex, UnifiedTable, YearRange};

    fn charts() -> ChartSet {
        let table = UnifiedTable::from_records(vec![
            Record::new("Mary", Sex::F, 100, 1900),
            Record::new("John", Sex::M, 90, 1900),
            Record::new("Mary", Sex::F, 120, 1901),
        ]);
        let config = RunConfig {
            names: vec!["Mary".to_string(), "Bob".to_string()],
            trend_range: YearRange::new(1900, 1901),
            ..RunConfig::default()
        };
        build_chart_set(&table, 1900, &config)
    }

    #[test]
    fn keys_walk_through_every_figure() {
        let charts = charts();
        let mut app = App::new(&charts);
        assert_eq!(app.figure(), Figure::YearSummary);

        assert!(!app.handle_key(KeyCode::Left));
        assert_eq!(app.page, 0);

        for expected in &Figure::ALL[1..] {
            assert!(!app.handle_key(KeyCode::Enter));
            assert_eq!(app.figure(), *expected);
        }
        assert!(!app.handle_key(KeyCode::Left));
        assert_eq!(app.figure(), Figure::NameTrends);

        assert!(!app.handle_key(KeyCode::Right));
        assert!(app.handle_key(KeyCode::Enter), "leaving the last figure ends the session");
    }

    #[test]
    fn quit_keys_end_the_session() {
        let charts = charts();
        let mut app = App::new(&charts);
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.handle_key(KeyCode::Esc));
    }

    #[test]
    fn sex_slices_carry_counts_and_shares() {
        let slices = sex_slices(&charts());
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "F 100 (52.6%)");
        assert_eq!(slices[1].label, "M 90 (47.4%)");
    }

    #[test]
    fn name_series_follow_the_matrix() {
        let series = name_series(&charts());
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "Mary");
        assert_eq!(series[0].points, vec![(1900.0, 100.0), (1901.0, 120.0)]);
        assert_eq!(series[1].points, vec![(1900.0, 0.0), (1901.0, 0.0)]);

        let (x, y) = line_bounds(&series);
        assert_eq!(x, [1900.0, 1901.0]);
        assert!((y[1] - 126.0).abs() < 1e-9);
    }

    #[test]
    fn empty_series_get_default_bounds() {
        let (x, y) = line_bounds(&[]);
        assert_eq!(x, [1880.0, 2010.0]);
        assert_eq!(y, [0.0, 1.0]);
    }
}
