use std::collections::HashMap;

use egui::Ui;

use crate::data::series::Domain;
use crate::data::series_look::SeriesLook;
use crate::data::visibility::VisibilityFilter;
use crate::events::ChartEvent;
use crate::sync::CurveFrame;

/// Legend shared by both charts: one checkbox per series plus the values at
/// the query position.
#[derive(Default)]
pub struct SeriesPanel {
    pub hover_series: Option<String>,
}

fn fmt_opt(v: Option<f64>, decimals: usize, unit: &str) -> String {
    match v {
        Some(v) if v.is_finite() => format!("{v:.decimals$} {unit}"),
        _ => "—".to_string(),
    }
}

impl SeriesPanel {
    pub fn render_panel(
        &mut self,
        ui: &mut Ui,
        names: &[String],
        looks: &HashMap<String, SeriesLook>,
        visibility: &VisibilityFilter,
        curve: &CurveFrame,
        events: &mut Vec<ChartEvent>,
    ) {
        ui.horizontal(|ui| {
            ui.strong("Series");
            if ui.small_button("All").clicked() {
                for name in names {
                    if !visibility.is_visible(name) {
                        events.push(ChartEvent::LegendToggled {
                            name: name.clone(),
                            visible: true,
                        });
                    }
                }
            }
            if ui.small_button("None").clicked() {
                for name in names {
                    if visibility.is_visible(name) {
                        events.push(ChartEvent::LegendToggled {
                            name: name.clone(),
                            visible: false,
                        });
                    }
                }
            }
        });
        ui.separator();

        if names.is_empty() {
            ui.label("No dataset loaded.");
            return;
        }

        let cross_label = match curve.domain {
            Domain::Rpm => "Noise",
            Domain::NoiseDb => "Speed",
        };
        let cross_unit = curve.domain.other().unit();
        let mut hovered = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("series_grid")
                .num_columns(5)
                .striped(true)
                .show(ui, |ui| {
                    ui.label("");
                    ui.strong("Airflow");
                    ui.strong(cross_label);
                    ui.strong("Spectrum @");
                    ui.strong("Level");
                    ui.end_row();

                    for name in names {
                        let look = looks.get(name).cloned().unwrap_or_default();
                        let mut visible = visibility.is_visible(name);
                        let resp = ui.horizontal(|ui| {
                            let (rect, _) = ui.allocate_exact_size(
                                egui::vec2(12.0, 12.0),
                                egui::Sense::hover(),
                            );
                            ui.painter().rect_filled(rect, 2.0, look.color);
                            ui.checkbox(&mut visible, name.as_str())
                        });
                        if resp.inner.changed() {
                            events.push(ChartEvent::LegendToggled {
                                name: name.clone(),
                                visible,
                            });
                        }
                        if resp.response.hovered() || resp.inner.hovered() {
                            hovered = Some(name.clone());
                        }

                        let readout = curve.get(name).map(|s| &s.readout);
                        let cross_decimals = if curve.domain == Domain::Rpm { 1 } else { 0 };
                        ui.label(fmt_opt(readout.and_then(|r| r.airflow), 1, "m³/h"));
                        ui.label(fmt_opt(
                            readout.and_then(|r| r.cross),
                            cross_decimals,
                            cross_unit,
                        ));
                        ui.label(fmt_opt(readout.and_then(|r| r.spectrum_rpm), 0, "RPM"));
                        ui.label(fmt_opt(readout.and_then(|r| r.composite_db), 1, "dB"));
                        ui.end_row();
                    }
                });
        });

        self.hover_series = hovered;
    }
}

#[cfg(test)]
mod tests {
    use super::fmt_opt;

    #[test]
    fn missing_values_show_a_dash() {
        assert_eq!(fmt_opt(None, 1, "dB"), "—");
        assert_eq!(fmt_opt(Some(f64::NAN), 1, "dB"), "—");
        assert_eq!(fmt_opt(Some(42.04), 1, "dB"), "42.0 dB");
    }
}
