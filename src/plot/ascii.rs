//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - series traces: one lowercase glyph per asset (`a`, `b`, `c`, ...)
//! - recession bands: `.` shading behind the traces
//! - event markers: `|` columns behind the traces

use crate::chart::{date_to_x, ChartSpec};

const SERIES_GLYPHS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Glyph for the trace at `index` (wraps past 26 series).
pub fn series_glyph(index: usize) -> char {
    SERIES_GLYPHS[index % SERIES_GLYPHS.len()] as char
}

/// Render an assembled chart into a fixed character grid.
pub fn render_ascii_chart(spec: &ChartSpec, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let x0 = date_to_x(spec.x_bounds[0]);
    let x1 = date_to_x(spec.x_bounds[1]);
    let [y0, y1] = spec.y_bounds;

    let mut grid = vec![vec![' '; width]; height];

    // Overlays first so traces draw over them.
    for band in &spec.bands {
        let c0 = map_x(date_to_x(band.x0), x0, x1, width);
        let c1 = map_x(date_to_x(band.x1), x0, x1, width);
        for row in grid.iter_mut() {
            for cell in &mut row[c0..=c1] {
                *cell = '.';
            }
        }
    }
    for marker in &spec.markers {
        let col = map_x(date_to_x(marker.date), x0, x1, width);
        for row in grid.iter_mut() {
            row[col] = '|';
        }
    }

    for (idx, trace) in spec.traces.iter().enumerate() {
        let glyph = series_glyph(idx);
        for &(date, value) in &trace.points {
            let col = map_x(date_to_x(date), x0, x1, width);
            let row = map_y(value, y0, y1, height);
            grid[row][col] = glyph;
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} -> {} | y=[{y0:.0}, {y1:.0}]\n",
        spec.x_bounds[0], spec.x_bounds[1]
    ));

    for row in &grid {
        out.push_str(&row.iter().collect::<String>());
        out.push('\n');
    }

    // Legend.
    for (idx, trace) in spec.traces.iter().enumerate() {
        out.push_str(&format!("  {} = {}\n", series_glyph(idx), trace.name));
    }
    for band in &spec.bands {
        out.push_str(&format!("  . = {} ({} -> {})\n", band.label, band.x0, band.x1));
    }
    for marker in &spec.markers {
        out.push_str(&format!("  | = {} ({})\n", marker.label, marker.date));
    }

    out
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    if x_max <= x_min {
        return 0;
    }
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    ((width - 1) as f64 * u).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    if y_max <= y_min {
        return height - 1;
    }
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // Row 0 is the top of the grid.
    (height - 1) - ((height - 1) as f64 * u).round() as usize
}
