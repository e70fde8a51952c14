//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - horizontal bars: `#`
//! - line series: one glyph per series (`*`, `+`, `o`, `x`, `%`, `@`), listed in a legend

/// Glyphs assigned to line series in order.
const SERIES_GLYPHS: [char; 6] = ['*', '+', 'o', 'x', '%', '@'];

/// One labelled `(year, count)` series.
#[derive(Debug, Clone, Copy)]
pub struct Series<'a> {
    pub label: &'a str,
    pub points: &'a [(i32, u64)],
}

/// Render labelled values as horizontal bars scaled to the largest value.
pub fn render_bar_chart(entries: &[(String, u64)], bar_width: usize) -> String {
    let bar_width = bar_width.max(1);
    let label_width = entries.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = entries.iter().map(|(_, v)| *v).max().unwrap_or(0);

    let mut out = String::new();
    for (label, value) in entries {
        let len = if max == 0 {
            0
        } else {
            ((*value as f64 / max as f64) * bar_width as f64).round() as usize
        };
        let bar = "#".repeat(len.min(bar_width));
        out.push_str(&format!("{label:<label_width$} |{bar:<bar_width$} {value}\n"));
    }
    out
}

/// Render one or more year series on a shared grid, with a legend.
pub fn render_line_plot(series: &[Series<'_>], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = year_bounds(series).unwrap_or((crate::domain::MIN_YEAR, crate::domain::MAX_YEAR));
    let y_max = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(_, c)| c))
        .max()
        .unwrap_or(0)
        .max(1);

    let mut grid = vec![vec![' '; width]; height];

    for (idx, s) in series.iter().enumerate() {
        let glyph = SERIES_GLYPHS[idx % SERIES_GLYPHS.len()];
        let cells: Vec<(usize, usize)> = s
            .points
            .iter()
            .map(|&(year, count)| {
                (
                    map_x(year, x_min, x_max, width),
                    map_y(count, y_max, height),
                )
            })
            .collect();
        draw_polyline(&mut grid, &cells, glyph);
    }

    let mut out = String::new();
    out.push_str(&format!("Plot: years=[{x_min}, {x_max}] | count=[0, {y_max}]\n"));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    for (idx, s) in series.iter().enumerate() {
        let glyph = SERIES_GLYPHS[idx % SERIES_GLYPHS.len()];
        out.push_str(&format!("{glyph} {}\n", s.label));
    }

    out
}

fn year_bounds(series: &[Series<'_>]) -> Option<(i32, i32)> {
    let mut min = i32::MAX;
    let mut max = i32::MIN;
    for &(year, _) in series.iter().flat_map(|s| s.points.iter()) {
        min = min.min(year);
        max = max.max(year);
    }
    if min <= max { Some((min, max)) } else { None }
}

fn map_x(year: i32, x_min: i32, x_max: i32, width: usize) -> usize {
    if x_max <= x_min {
        return 0;
    }
    let u = ((year - x_min) as f64 / (x_max - x_min) as f64).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(count: u64, y_max: u64, height: usize) -> usize {
    let u = (count as f64 / y_max as f64).clamp(0.0, 1.0);
    // count=max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(grid: &mut [Vec<char>], cells: &[(usize, usize)], ch: char) {
    let mut prev: Option<(usize, usize)> = None;
    for &(x, y) in cells {
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, y, ch),
            None => {
                if grid[y][x] == ' ' {
                    grid[y][x] = ch;
                }
            }
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish). Earlier series keep their cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_chart_golden_snapshot() {
        let entries = vec![("Mary".to_string(), 220), ("John".to_string(), 90)];
        let txt = render_bar_chart(&entries, 10);
        let expected = concat!(
            "Mary |########## 220\n",
            "John |####       90\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn bar_chart_with_all_zero_values_has_empty_bars() {
        let entries = vec![("Bob".to_string(), 0)];
        assert_eq!(render_bar_chart(&entries, 3), "Bob |    0\n");
    }

    #[test]
    fn line_plot_golden_snapshot_small() {
        let points = [(1900, 0), (1909, 9)];
        let series = [Series {
            label: "Mary",
            points: &points,
        }];
        let txt = render_line_plot(&series, 10, 5);
        let expected = concat!(
            "Plot: years=[1900, 1909] | count=[0, 9]\n",
            "        **\n",
            "      **  \n",
            "    **    \n",
            "  **      \n",
            "**        \n",
            "* Mary\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn line_plot_assigns_distinct_glyphs() {
        let a = [(2000, 5), (2001, 5)];
        let b = [(2000, 0), (2001, 0)];
        let series = [
            Series { label: "A", points: &a },
            Series { label: "B", points: &b },
        ];
        let txt = render_line_plot(&series, 10, 5);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[1], "**********");
        assert_eq!(lines[5], "++++++++++");
        assert_eq!(lines[6], "* A");
        assert_eq!(lines[7], "+ B");
    }
}
