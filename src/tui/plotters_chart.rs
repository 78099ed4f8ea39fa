//! Plotters-powered comparison chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - easy to extend later (more overlay kinds, exportable PNG/SVG backends)
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::chart::{date_to_x, fmt_axis_date, fmt_axis_value, palette_color, ChartSpec};

/// A render-only view over an assembled [`ChartSpec`].
///
/// The widget is intentionally data-driven: traces, overlays, and bounds are
/// computed outside the render call. This keeps `render()` focused on drawing
/// and makes the data prep testable on its own.
pub struct ComparisonChart<'a> {
    pub spec: &'a ChartSpec,
}

impl<'a> Widget for ComparisonChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = date_to_x(self.spec.x_bounds[0]);
        let x1 = date_to_x(self.spec.x_bounds[1]);
        let [y0, y1] = self.spec.y_bounds;

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        let spec = self.spec;

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels. Mesh lines are disabled to reduce visual
            // clutter in low-resolution terminal rendering.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(spec.layout.x_label)
                .y_desc(spec.layout.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| fmt_axis_date(*v))
                .y_label_formatter(&|v| fmt_axis_value(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let band_color = RGBColor(160, 160, 160);
            let marker_color = RGBColor(255, 0, 0);
            let label_style = ("sans-serif", 10).into_font().color(&WHITE);

            // 1) Recession bands, below the traces.
            for band in &spec.bands {
                chart.draw_series(std::iter::once(Rectangle::new(
                    [
                        (date_to_x(band.x0), band.y0),
                        (date_to_x(band.x1), band.y1),
                    ],
                    band_color.mix(0.2).filled(),
                )))?;
                chart.draw_series(std::iter::once(Text::new(
                    band.label,
                    (date_to_x(band.label_x), band.label_y),
                    label_style.clone(),
                )))?;
            }

            // 2) One line trace per asset, palette applied in table order.
            for (idx, trace) in spec.traces.iter().enumerate() {
                let (r, g, b) = palette_color(idx);
                let color = RGBColor(r, g, b);
                chart.draw_series(LineSeries::new(
                    trace.points.iter().map(|&(d, v)| (date_to_x(d), v)),
                    &color,
                ))?;
            }

            // 3) Event markers, above the traces.
            for marker in &spec.markers {
                let x = date_to_x(marker.date);
                chart.draw_series(DashedLineSeries::new(
                    [(x, y0), (x, y1)].into_iter(),
                    4,
                    2,
                    marker_color.mix(0.5).stroke_width(1),
                ))?;
                chart.draw_series(std::iter::once(Text::new(
                    marker.label,
                    (x, marker.label_y),
                    label_style.clone(),
                )))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
