use std::collections::HashMap;

use egui::{Color32, Ui};
use egui_plot::{Line, Plot, Points, VLine};

use crate::chart::{AxisWindow, Redraw};
use crate::data::series::Domain;
use crate::data::series_look::SeriesLook;
use crate::events::ChartEvent;
use crate::sync::{CurveFrame, SyncState};

/// Airflow vs. RPM (or vs. noise) with the draggable query line.
pub struct CurvePanel {
    frame: CurveFrame,
    /// Set by a `Rebuild` redraw: the next paint forces the frame's window
    /// onto the plot instead of keeping egui_plot's remembered bounds.
    rebuild_pending: bool,
    reported_width: f32,
    hover_series: Option<String>,
}

impl Default for CurvePanel {
    fn default() -> Self {
        Self {
            frame: CurveFrame::default(),
            rebuild_pending: true,
            reported_width: 0.0,
            hover_series: None,
        }
    }
}

impl CurvePanel {
    pub fn apply(&mut self, frame: &CurveFrame, redraw: Redraw) {
        self.frame = frame.clone();
        if redraw == Redraw::Rebuild {
            self.rebuild_pending = true;
        }
    }

    pub fn set_hover_series(&mut self, name: Option<String>) {
        self.hover_series = name;
    }

    pub fn render_controls(&mut self, ui: &mut Ui, extent: Option<AxisWindow>, events: &mut Vec<ChartEvent>) {
        let domain = self.frame.domain;
        ui.horizontal(|ui| {
            ui.strong("X-Axis");
            for d in Domain::ALL {
                if ui.selectable_label(domain == d, d.label()).clicked() && d != domain {
                    events.push(ChartEvent::SwitchDomain(d));
                }
            }

            ui.separator();

            if let (Some(mut value), Some(window)) = (self.frame.query, self.frame.window) {
                ui.label("Query:");
                let speed = (window.span() / 200.0).max(1e-3);
                let resp = ui.add(
                    egui::DragValue::new(&mut value)
                        .range(window.min..=window.max)
                        .speed(speed)
                        .max_decimals(if domain == Domain::Rpm { 0 } else { 1 })
                        .suffix(format!(" {}", domain.unit())),
                );
                if resp.changed() {
                    events.push(ChartEvent::QueryInput { value });
                }
            }

            ui.separator();

            if ui
                .button(format!("{} Fit", egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE))
                .on_hover_text("Show the full range of the visible series")
                .clicked()
            {
                if let Some(extent) = extent {
                    self.rebuild_pending = true;
                    self.frame.window = Some(extent);
                }
            }
        });
    }

    pub fn render_plot(
        &mut self,
        ui: &mut Ui,
        height: f32,
        looks: &HashMap<String, SeriesLook>,
        state: SyncState,
        events: &mut Vec<ChartEvent>,
    ) {
        let domain = self.frame.domain;
        let plot = Plot::new("curve_plot")
            .height(height)
            .allow_drag(false)
            .allow_zoom(true)
            .allow_scroll(true)
            .allow_boxed_zoom(true)
            .allow_double_click_reset(false)
            .x_axis_label(format!("{} [{}]", domain.label(), domain.unit()))
            .y_axis_label("Airflow [m³/h]");

        let rebuild = self.rebuild_pending.then_some(self.frame.window).flatten();
        let frame = &self.frame;
        let hover = self.hover_series.as_deref();

        let plot_resp = plot.show(ui, |plot_ui| {
            if let Some(w) = rebuild {
                plot_ui.set_plot_bounds_x(w.min..=w.max);
                if let Some((lo, hi)) = y_range(frame) {
                    let pad = ((hi - lo) * 0.05).max(1.0);
                    plot_ui.set_plot_bounds_y((lo - pad).max(0.0)..=hi + pad);
                }
            }

            for s in &frame.series {
                let look = looks.get(&s.name).cloned().unwrap_or_default();
                let mut color = look.color;
                let mut width = look.width.max(0.1);
                if let Some(h) = hover {
                    if h != s.name {
                        color = look.dimmed();
                    } else {
                        width = (width * 1.6).max(width + 1.0);
                    }
                }
                if !s.line.is_empty() {
                    plot_ui.line(
                        Line::new(&s.name, s.line.clone())
                            .color(color)
                            .width(width)
                            .style(look.style),
                    );
                }
                if look.show_points && !s.measured.is_empty() {
                    plot_ui.points(
                        Points::new(&s.name, s.measured.clone())
                            .radius(look.point_size.max(0.5))
                            .shape(look.marker)
                            .color(color),
                    );
                }
            }

            if let Some(q) = frame.query {
                plot_ui.vline(
                    VLine::new("query", q)
                        .color(Color32::from_rgb(230, 70, 70))
                        .width(1.5),
                );
            }

            let resp = plot_ui.response();
            let pressed = resp.drag_started_by(egui::PointerButton::Primary)
                || resp.clicked_by(egui::PointerButton::Primary);
            let dragging = resp.dragged_by(egui::PointerButton::Primary);
            let released = resp.drag_stopped_by(egui::PointerButton::Primary)
                || resp.clicked_by(egui::PointerButton::Primary);
            (plot_ui.pointer_coordinate(), pressed, dragging, released)
        });

        let (pointer, pressed, dragging, released) = plot_resp.inner;
        if let Some(p) = pointer {
            if pressed {
                events.push(ChartEvent::PointerPressed { value: p.x });
            } else if dragging {
                events.push(ChartEvent::PointerMoved { value: p.x });
            }
        }
        if released {
            events.push(ChartEvent::PointerReleased);
        }

        let width = plot_resp.response.rect.width();
        if (width - self.reported_width).abs() >= 1.0 {
            self.reported_width = width;
            events.push(ChartEvent::Resized { width_px: width });
        }

        let b = plot_resp.transform.bounds();
        let xr = b.range_x();
        let shown = AxisWindow::new(*xr.start(), *xr.end());
        if self.rebuild_pending && rebuild.is_some() {
            self.rebuild_pending = false;
            events.push(ChartEvent::ViewChanged(shown));
        } else if shown.is_valid() && !same_window(Some(shown), self.frame.window) {
            events.push(ChartEvent::ViewChanged(shown));
        } else if matches!(state, SyncState::ZoomPanning | SyncState::AxisSwitching) {
            events.push(ChartEvent::ViewSettled);
        }
    }
}

fn y_range(frame: &CurveFrame) -> Option<(f64, f64)> {
    frame
        .series
        .iter()
        .flat_map(|s| s.line.iter().chain(s.measured.iter()))
        .map(|p| p[1])
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn same_window(a: Option<AxisWindow>, b: Option<AxisWindow>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            let eps = 1e-9 * a.span().abs().max(b.span().abs()).max(1.0);
            (a.min - b.min).abs() <= eps && (a.max - b.max).abs() <= eps
        }
        (None, None) => true,
        _ => false,
    }
}
