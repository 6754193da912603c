//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Line series are drawn first with `-`, `=`, `~`, ...; point series overlay
//! them with `o`, `x`, `*`, ... A legend follows the grid.

use super::{Chart, SeriesStyle};

const LINE_GLYPHS: [char; 5] = ['-', '=', '~', ':', '.'];
const POINT_GLYPHS: [char; 5] = ['o', 'x', '*', '+', '#'];

/// Render several charts separated by blank lines.
pub fn render_ascii_charts(charts: &[Chart], width: usize, height: usize) -> String {
    charts
        .iter()
        .map(|c| render_ascii_chart(c, width, height))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one chart onto a `width x height` character grid.
pub fn render_ascii_chart(chart: &Chart, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let mut out = String::new();
    out.push_str(&chart.title);
    out.push('\n');

    let Some(([x_min, x_max], [y_min, y_max])) = chart.bounds() else {
        out.push_str("(no data)\n");
        return out;
    };
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    let glyphs = assign_glyphs(chart);

    // Draw lines first (so points can overlay).
    for (s, &ch) in chart.series.iter().zip(&glyphs) {
        if s.style == SeriesStyle::Line {
            draw_curve(&mut grid, &s.points, x_min, x_max, y_min, y_max, ch);
        }
    }
    for (s, &ch) in chart.series.iter().zip(&glyphs) {
        if s.style != SeriesStyle::Points {
            continue;
        }
        for &(x, y) in &s.points {
            if !(x.is_finite() && y.is_finite()) {
                continue;
            }
            let col = map_x(x, x_min, x_max, width);
            let row = map_y(y, y_min, y_max, height);
            grid[row][col] = ch;
        }
    }

    out.push_str(&format!(
        "x={} [{x_min:.3}, {x_max:.3}] | y={} [{y_min:.3}, {y_max:.3}]\n",
        chart.x_label, chart.y_label
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    for (s, ch) in chart.series.iter().zip(glyphs) {
        out.push_str(&format!("  {ch} {}\n", s.label));
    }

    out
}

fn assign_glyphs(chart: &Chart) -> Vec<char> {
    let mut lines = 0usize;
    let mut points = 0usize;
    chart
        .series
        .iter()
        .map(|s| match s.style {
            SeriesStyle::Line => {
                lines += 1;
                LINE_GLYPHS[(lines - 1) % LINE_GLYPHS.len()]
            }
            SeriesStyle::Points => {
                points += 1;
                POINT_GLYPHS[(points - 1) % POINT_GLYPHS.len()]
            }
        })
        .collect()
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    ch: char,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, ch);
        } else if grid[row][col] == ' ' {
            grid[row][col] = ch;
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
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
