//! Standalone application wrapper for FanPlot.
//!
//! [`FanPlotApp`] owns the [`SyncController`] and the [`DualView`] it draws
//! into, and implements [`eframe::App`]. Each frame the panels collect
//! [`ChartEvent`]s, which are then fed to the controller one by one.

use std::path::Path;

use eframe::egui;

use crate::config::FanPlotConfig;
use crate::data::dataset::Dataset;
use crate::events::ChartEvent;
use crate::panels::DualView;
use crate::sync::SyncController;

pub struct FanPlotApp {
    pub controller: SyncController,
    pub view: DualView,
    config: FanPlotConfig,
    events: Vec<ChartEvent>,
    /// Last load error or status text, shown in the top bar.
    status: Option<String>,
    first_frame: bool,
}

impl FanPlotApp {
    pub fn new(dataset: Dataset, config: FanPlotConfig) -> Self {
        let mut view = DualView::default();
        view.set_series(dataset.series());
        Self {
            controller: SyncController::new(dataset, &config),
            view,
            config,
            events: Vec::new(),
            status: None,
            first_frame: true,
        }
    }

    /// Replace the dataset with the contents of `path`. On failure the
    /// current dataset stays and the error is shown in the top bar.
    pub fn open_dataset(&mut self, path: &Path) {
        match Dataset::load(path) {
            Ok(dataset) => {
                log::info!("opened dataset {}", path.display());
                self.view.set_series(dataset.series());
                self.controller.set_dataset(dataset, &mut self.view);
                self.status = Some(path.display().to_string());
            }
            Err(e) => {
                log::error!("failed to open {}: {e}", path.display());
                self.status = Some(format!("Failed to open {}: {e}", path.display()));
            }
        }
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .button(format!("{} Open dataset…", egui_phosphor::regular::FOLDER_OPEN))
                .clicked()
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Dataset", &["yaml", "yml", "json"])
                    .pick_file()
                {
                    self.open_dataset(&path);
                }
            }
            ui.separator();
            ui.label(format!("Weighting: {}", self.config.spectrum.weighting.label()));
            if let Some(status) = &self.status {
                ui.separator();
                ui.label(status);
            }
        });
    }

    fn dispatch_events(&mut self) {
        for event in self.events.drain(..) {
            self.controller.handle(event, &mut self.view);
        }
    }
}

impl eframe::App for FanPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            self.first_frame = false;
            self.controller.refresh(&mut self.view);
        }

        egui::TopBottomPanel::top("fanplot_top_bar").show(ctx, |ui| {
            self.render_top_bar(ui);
        });

        egui::SidePanel::right("fanplot_series")
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                self.view.series.render_panel(
                    ui,
                    &self.view.names,
                    &self.view.looks,
                    self.controller.visibility(),
                    self.controller.curve_frame(),
                    &mut self.events,
                );
            });
        self.view.sync_hover();

        egui::CentralPanel::default().show(ctx, |ui| {
            let extent = self.controller.extent(self.controller.domain());
            self.view.curve.render_controls(ui, extent, &mut self.events);
            ui.separator();

            let avail = ui.available_height();
            let curve_h = (avail * 0.55).max(120.0);
            let spectrum_h = (avail - curve_h - 16.0).max(100.0);
            let state = self.controller.state();
            let DualView {
                curve,
                spectrum,
                looks,
                ..
            } = &mut self.view;
            curve.render_plot(ui, curve_h, looks, state, &mut self.events);
            ui.separator();
            spectrum.render_plot(ui, spectrum_h, looks, self.controller.reconstructor().config());
        });

        let had_events = !self.events.is_empty();
        self.dispatch_events();
        if had_events {
            ctx.request_repaint();
        }
    }
}
