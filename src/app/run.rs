//! Top-level entry point for running FanPlot as a native window.

use eframe::egui;

use crate::config::FanPlotConfig;
use crate::data::dataset::Dataset;

use super::FanPlotApp;

/// Launch FanPlot in a native window showing `dataset`.
///
/// Blocks until the window is closed.
pub fn run_fanplot(dataset: Dataset, mut cfg: FanPlotConfig) -> eframe::Result<()> {
    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1400.0, 900.0));
    }

    let app = FanPlotApp::new(dataset, cfg);
    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
