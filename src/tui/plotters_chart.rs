//! Plotters-powered score comparison chart for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `BarChart` widget?
//! - proper numeric y axis with ticks and labels
//! - a reference guide line drawn in data coordinates
//! - easy to extend later (more reference lines, exportable PNG/SVG backends)
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::prelude::*;
// `ratatui::style::Color` below shadows the Plotters `Color` trait; keep the
// trait in scope anonymously so `.filled()` still resolves.
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::{SCORE_MAX, SCORE_MIN};

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: the scores and bounds are computed
/// outside the render call, so `render()` stays focused on drawing. Bars are
/// clamped to the score scale before drawing; the raw values still appear in
/// the labels above each bar.
pub struct ScoreBarChart {
    /// Predicted score (raw, may lie outside the score scale).
    pub predicted: f64,
    /// Fixed comparison score.
    pub reference: f64,
    /// Y bounds of the chart, taller than the score scale so labels fit.
    pub y_bounds: [f64; 2],
    /// Category names under the bars.
    pub predicted_label: &'static str,
    pub reference_label: &'static str,
    /// Formatting of y tick labels.
    pub fmt_y: fn(f64) -> String,
}

impl Widget for ScoreBarChart {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Área do gráfico muito pequena (redimensione o terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(y0.is_finite() && y1.is_finite() && self.predicted.is_finite() && self.reference.is_finite())
            || y1 <= y0
        {
            return;
        }

        let predicted_bar = self.predicted.clamp(SCORE_MIN, SCORE_MAX);
        let reference_bar = self.reference.clamp(SCORE_MIN, SCORE_MAX);

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        //
        // We delegate rendering to the crate-provided widget helper to avoid
        // coupling our code to its internal backend types.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                // Two segments on the x axis, one per bar.
                .build_cartesian_2d((0i32..1i32).into_segmented(), y0..y1)?;

            // Axes + tick labels.
            //
            // We disable the mesh lines to reduce visual clutter in low-resolution
            // terminal rendering; the y ticks are enough to read the bars against.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(2)
                .y_labels(5)
                .x_label_formatter(&|seg| match seg {
                    SegmentValue::CenterOf(0) | SegmentValue::Exact(0) => {
                        self.predicted_label.to_string()
                    }
                    SegmentValue::CenterOf(1) | SegmentValue::Exact(1) => {
                        self.reference_label.to_string()
                    }
                    _ => String::new(),
                })
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Series styling: keep the palette high-contrast for terminal readability.
            let predicted_color = RGBColor(0, 255, 255); // cyan
            let reference_color = RGBColor(128, 128, 128); // gray

            // 1) The two bars. The second segment ends at the axis end, so its
            //    right edge is `SegmentValue::Last` rather than `Exact(2)`.
            let mut bar_a = Rectangle::new(
                [
                    (SegmentValue::Exact(0), y0),
                    (SegmentValue::Exact(1), predicted_bar),
                ],
                predicted_color.filled(),
            );
            bar_a.set_margin(0, 0, 2, 2);
            let mut bar_b = Rectangle::new(
                [
                    (SegmentValue::Exact(1), y0),
                    (SegmentValue::Last, reference_bar),
                ],
                reference_color.filled(),
            );
            bar_b.set_margin(0, 0, 2, 2);
            chart.draw_series([bar_a, bar_b])?;

            // 2) Reference guide line across the full width.
            chart.draw_series(LineSeries::new(
                [
                    (SegmentValue::Exact(0), self.reference),
                    (SegmentValue::Last, self.reference),
                ],
                &WHITE,
            ))?;

            // 3) Raw values above each bar, kept inside the chart by the taller
            //    y bounds.
            let label_gap = (y1 - y0) * 0.05;
            let label_y = |bar: f64| (bar + label_gap).min(y1 - label_gap);
            let label_style = ("sans-serif", 10).into_font().color(&WHITE);
            chart.draw_series([
                Text::new(
                    format!("{:.2}", self.predicted),
                    (SegmentValue::CenterOf(0), label_y(predicted_bar)),
                    label_style.clone(),
                ),
                Text::new(
                    format!("{:.2}", self.reference),
                    (SegmentValue::CenterOf(1), label_y(reference_bar)),
                    label_style,
                ),
            ])?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
