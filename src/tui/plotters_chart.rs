//! Plotters-powered chart widgets for Ratatui.
//!
//! Three render-only widgets cover the figure sequence:
//! - `PiePlottersChart`: share of a whole (wedges drawn as polygons)
//! - `LinePlottersChart`: one or more year series with a legend
//! - `BarPlottersChart`: horizontal ranked bars
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use std::f64::consts::TAU;

use plotters::prelude::*;
// The ratatui `Color` import below shadows the prelude's trait of the same name.
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// High-contrast palette for terminal readability.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(135, 206, 250), // light blue
    RGBColor(255, 182, 193), // light pink
    RGBColor(255, 153, 153),
    RGBColor(102, 179, 255),
    RGBColor(153, 255, 153),
    RGBColor(255, 204, 153),
    RGBColor(204, 153, 255),
    RGBColor(255, 255, 102),
    RGBColor(0, 255, 255),
    RGBColor(255, 102, 255),
];

/// Segments used to approximate a full circle.
const CIRCLE_STEPS: usize = 96;

pub fn palette_color(idx: usize) -> RGBColor {
    PALETTE[idx % PALETTE.len()]
}

/// One labelled pie slice.
#[derive(Debug, Clone)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: RGBColor,
}

/// One labelled line series.
#[derive(Debug, Clone)]
pub struct LineSeriesData {
    pub label: String,
    pub color: RGBColor,
    pub points: Vec<(f64, f64)>,
}

/// Start/end angles (radians, clockwise from 12 o'clock) of each slice.
///
/// Zero and negative values get an empty wedge; an all-zero input yields no wedges.
pub fn pie_angles(values: &[f64]) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = 0.0;
    values
        .iter()
        .map(|&v| {
            let share = if v.is_finite() && v > 0.0 { v / total } else { 0.0 };
            let end = start + share * TAU;
            let wedge = (start, end);
            start = end;
            wedge
        })
        .collect()
}

/// Polygon outline of a wedge of the unit circle centered on the origin.
pub fn wedge_polygon(start: f64, end: f64) -> Vec<(f64, f64)> {
    let span = (end - start).max(0.0);
    let steps = ((span / TAU) * CIRCLE_STEPS as f64).ceil().max(1.0) as usize;

    let mut out = Vec::with_capacity(steps + 2);
    out.push((0.0, 0.0));
    for i in 0..=steps {
        let a = start + span * (i as f64 / steps as f64);
        out.push(angle_point(a, 1.0));
    }
    out
}

/// Point at `radius` for a clockwise-from-top angle.
fn angle_point(angle: f64, radius: f64) -> (f64, f64) {
    (radius * angle.sin(), radius * angle.cos())
}

fn too_small(area: Rect, buf: &mut Buffer) -> bool {
    // When the available area is too small, Plotters may fail to build a chart.
    // In that case, we render a small hint rather than panicking.
    if area.width < 20 || area.height < 8 {
        buf.set_string(
            area.x,
            area.y,
            "Chart area too small (resize terminal).",
            Style::default().fg(Color::Yellow),
        );
        return true;
    }
    false
}

pub struct PiePlottersChart<'a> {
    pub slices: &'a [PieSlice],
}

impl<'a> Widget for PiePlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if too_small(area, buf) {
            return;
        }

        let values: Vec<f64> = self.slices.iter().map(|s| s.value).collect();
        let angles = pie_angles(&values);
        if angles.is_empty() {
            buf.set_string(area.x, area.y, "No data.", Style::default().fg(Color::Yellow));
            return;
        }

        // Terminal cells are roughly twice as tall as wide; widen x so the pie
        // does not come out as a tall ellipse.
        let aspect = (area.width as f64 / (2.0 * area.height as f64)).max(1.0);
        let x_half = 1.6 * aspect;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .build_cartesian_2d(-x_half..x_half, -1.3..1.3)?;

            for (slice, &(start, end)) in self.slices.iter().zip(angles.iter()) {
                if end <= start {
                    continue;
                }
                chart.draw_series(std::iter::once(Polygon::new(
                    wedge_polygon(start, end),
                    slice.color.filled(),
                )))?;
            }

            let label_style = ("sans-serif", 10).into_font().color(&WHITE);
            for (slice, &(start, end)) in self.slices.iter().zip(angles.iter()) {
                if end <= start {
                    continue;
                }
                let (x, y) = angle_point((start + end) / 2.0, 1.12);
                // Anchor left-side labels so they grow away from the pie.
                let x = if x < 0.0 {
                    x - slice.label.chars().count() as f64 * (x_half / area.width as f64) * 2.0
                } else {
                    x
                };
                chart.draw_series(std::iter::once(Text::new(
                    slice.label.clone(),
                    (x, y),
                    label_style.clone(),
                )))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

pub struct LinePlottersChart<'a> {
    pub series: &'a [LineSeriesData],
    /// X bounds (years).
    pub x_bounds: [f64; 2],
    /// Y bounds (counts).
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    /// Draw the background mesh.
    pub grid: bool,
}

impl<'a> Widget for LinePlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if too_small(area, buf) {
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            {
                let mut mesh = chart.configure_mesh();
                if !self.grid {
                    mesh.disable_x_mesh().disable_y_mesh();
                }
                mesh.x_desc(self.x_label)
                    .y_desc(self.y_label)
                    .x_labels(6)
                    .y_labels(5)
                    .x_label_formatter(&|v| format!("{v:.0}"))
                    .y_label_formatter(&|v| format!("{v:.0}"))
                    .label_style(("sans-serif", 10).into_font().color(&WHITE))
                    .axis_style(&WHITE)
                    .bold_line_style(&RGBColor(90, 90, 90))
                    .light_line_style(&TRANSPARENT)
                    .draw()?;
            }

            for s in self.series {
                let color = s.color;
                chart
                    .draw_series(LineSeries::new(s.points.iter().copied(), &color))?
                    .label(s.label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 2, y)], &color));
            }

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .label_font(("sans-serif", 10).into_font().color(&WHITE))
                .border_style(&WHITE)
                .draw()?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

pub struct BarPlottersChart<'a> {
    /// `(label, value)` pairs, drawn top to bottom.
    pub bars: &'a [(String, f64)],
    pub x_label: &'a str,
}

impl<'a> Widget for BarPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if too_small(area, buf) {
            return;
        }

        let n = self.bars.len();
        let max = self.bars.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        if n == 0 || !max.is_finite() || max <= 0.0 {
            buf.set_string(area.x, area.y, "No data.", Style::default().fg(Color::Yellow));
            return;
        }
        let x_max = max * 1.05;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(0.0..x_max, 0.0..n as f64)?;

            chart
                .configure_mesh()
                .disable_y_mesh()
                .y_labels(0)
                .x_desc(self.x_label)
                .x_labels(5)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&RGBColor(90, 90, 90))
                .light_line_style(&TRANSPARENT)
                .draw()?;

            let bar_color = RGBColor(135, 206, 235); // sky blue
            // First bar at the top.
            let slot = |idx: usize| (n - 1 - idx) as f64;

            chart.draw_series(self.bars.iter().enumerate().map(|(idx, (_, v))| {
                let y = slot(idx);
                Rectangle::new([(0.0, y + 0.15), (*v, y + 0.85)], bar_color.filled())
            }))?;

            let label_style = ("sans-serif", 10).into_font().color(&WHITE);
            chart.draw_series(self.bars.iter().enumerate().map(|(idx, (label, v))| {
                Text::new(
                    format!("{label} ({v:.0})"),
                    (x_max * 0.01, slot(idx) + 0.5),
                    label_style.clone(),
                )
            }))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pie_angles_split_the_circle_by_share() {
        let angles = pie_angles(&[100.0, 90.0]);
        assert_eq!(angles.len(), 2);
        assert_eq!(angles[0].0, 0.0);
        assert!((angles[0].1 - TAU * 100.0 / 190.0).abs() < 1e-12);
        assert!((angles[1].1 - TAU).abs() < 1e-12);
    }

    #[test]
    fn pie_angles_give_zero_values_empty_wedges() {
        let angles = pie_angles(&[0.0, 5.0]);
        assert_eq!(angles[0].0, angles[0].1);
        assert!((angles[1].1 - TAU).abs() < 1e-12);
        assert!(pie_angles(&[0.0, 0.0]).is_empty());
        assert!(pie_angles(&[]).is_empty());
    }

    #[test]
    fn wedge_starts_at_center_and_stays_on_unit_circle() {
        let poly = wedge_polygon(0.0, TAU / 4.0);
        assert_eq!(poly[0], (0.0, 0.0));
        let (x, y) = poly[1];
        assert!(x.abs() < 1e-12 && (y - 1.0).abs() < 1e-12);
        let (x, y) = *poly.last().unwrap();
        assert!((x - 1.0).abs() < 1e-12 && y.abs() < 1e-12);
        for &(x, y) in &poly[1..] {
            assert!(((x * x + y * y).sqrt() - 1.0).abs() < 1e-9);
        }
    }

    fn drawn_cells(buf: &Buffer) -> usize {
        buf.content().iter().filter(|c| c.symbol() != " ").count()
    }

    #[test]
    fn pie_and_bar_widgets_draw_filled_shapes() {
        let area = Rect::new(0, 0, 60, 20);
        let slices = [
            PieSlice {
                label: "F".to_string(),
                value: 100.0,
                color: palette_color(0),
            },
            PieSlice {
                label: "M".to_string(),
                value: 90.0,
                color: palette_color(1),
            },
        ];
        let mut buf = Buffer::empty(area);
        PiePlottersChart { slices: &slices }.render(area, &mut buf);
        assert!(drawn_cells(&buf) > 0);

        let bars = [("Mary".to_string(), 120.0), ("John".to_string(), 90.0)];
        let mut buf = Buffer::empty(area);
        BarPlottersChart {
            bars: &bars,
            x_label: "Babies",
        }
        .render(area, &mut buf);
        assert!(drawn_cells(&buf) > 0);
    }

    #[test]
    fn empty_pie_says_no_data() {
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        PiePlottersChart { slices: &[] }.render(area, &mut buf);
        let first_row: String = (0..8).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(first_row, "No data.");
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(palette_color(0), palette_color(PALETTE.len()));
    }
}
