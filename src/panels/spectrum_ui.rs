use std::collections::HashMap;

use egui::Ui;
use egui_plot::{Line, Plot, Points};

use crate::chart::AxisScale;
use crate::config::SpectrumConfig;
use crate::data::series_look::SeriesLook;
use crate::data::spectrum::SpectrumFrame;

/// Octave-band spectrum of every visible series at its resolved RPM.
///
/// The y range is pinned to `[0, ceiling]` so moving the query never
/// rescales the chart.
#[derive(Default)]
pub struct SpectrumPanel {
    frame: SpectrumFrame,
    hover_series: Option<String>,
}

impl SpectrumPanel {
    pub fn apply(&mut self, frame: &SpectrumFrame) {
        self.frame = frame.clone();
    }

    pub fn set_hover_series(&mut self, name: Option<String>) {
        self.hover_series = name;
    }

    pub fn render_plot(
        &mut self,
        ui: &mut Ui,
        height: f32,
        looks: &HashMap<String, SeriesLook>,
        config: &SpectrumConfig,
    ) {
        let x_scale = if config.log_frequency_axis {
            AxisScale::Log10
        } else {
            AxisScale::Linear
        };
        let ceiling = config.display_ceiling(self.frame.y_max);
        let (f_lo, f_hi) = frequency_range(&self.frame).unwrap_or((20.0, 20_000.0));
        let x_lo = x_scale.to_plot(f_lo);
        let x_hi = x_scale.to_plot(f_hi);
        let x_pad = ((x_hi - x_lo) * 0.04).max(0.05);

        let plot = Plot::new("spectrum_plot")
            .height(height)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .x_axis_label(format!("Frequency [Hz] ({})", config.weighting.label()))
            .y_axis_label("Level [dB]")
            .x_axis_formatter(move |x, _range| {
                format_hz(x_scale.from_plot(x.value))
            })
            .label_formatter(move |name, value| {
                let hz = x_scale.from_plot(value.x);
                if name.is_empty() {
                    format!("{hz:.0} Hz\n{:.1} dB", value.y)
                } else {
                    format!("{name}\n{hz:.0} Hz\n{:.1} dB", value.y)
                }
            });

        let frame = &self.frame;
        let hover = self.hover_series.as_deref();
        plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds_x(x_lo - x_pad..=x_hi + x_pad);
            plot_ui.set_plot_bounds_y(0.0..=ceiling);

            for s in &frame.series {
                let look = looks.get(&s.name).cloned().unwrap_or_default();
                let mut color = look.color;
                let mut width = look.width.max(0.1);
                if let Some(h) = hover {
                    if h != s.name {
                        color = look.dimmed();
                    } else {
                        width += 1.0;
                    }
                }
                let pts: Vec<[f64; 2]> = s
                    .points
                    .iter()
                    .map(|p| [x_scale.to_plot(p[0]), p[1]])
                    .filter(|p| p[0].is_finite())
                    .collect();
                if pts.is_empty() {
                    continue;
                }
                plot_ui.line(
                    Line::new(&s.name, pts.clone())
                        .color(color)
                        .width(width)
                        .style(look.style),
                );
                plot_ui.points(
                    Points::new(&s.name, pts)
                        .radius(look.point_size.max(0.5))
                        .shape(look.marker)
                        .color(color),
                );
            }
        });
    }
}

/// `63`, `500`, `1k`, `2.5k`
pub fn format_hz(hz: f64) -> String {
    if !hz.is_finite() {
        return String::new();
    }
    if hz >= 1000.0 {
        let k = format!("{:.2}", hz / 1000.0);
        let k = k.trim_end_matches('0').trim_end_matches('.');
        format!("{k}k")
    } else {
        format!("{hz:.0}")
    }
}

fn frequency_range(frame: &SpectrumFrame) -> Option<(f64, f64)> {
    frame
        .series
        .iter()
        .flat_map(|s| s.points.iter())
        .map(|p| p[0])
        .filter(|hz| hz.is_finite() && *hz > 0.0)
        .fold(None, |acc, hz| match acc {
            None => Some((hz, hz)),
            Some((lo, hi)) => Some((lo.min(hz), hi.max(hz))),
        })
}
