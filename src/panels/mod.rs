pub mod curve_ui;
pub mod series_ui;
pub mod spectrum_ui;

pub use curve_ui::CurvePanel;
pub use series_ui::SeriesPanel;
pub use spectrum_ui::SpectrumPanel;

use std::collections::HashMap;

use crate::chart::{ChartSurface, Redraw};
use crate::data::series::SeriesDescriptor;
use crate::data::series_look::SeriesLook;
use crate::data::spectrum::SpectrumFrame;
use crate::sync::CurveFrame;

/// Both charts plus the legend, drawn from the frames the sync controller
/// hands over.
#[derive(Default)]
pub struct DualView {
    pub curve: CurvePanel,
    pub spectrum: SpectrumPanel,
    pub series: SeriesPanel,
    /// Series names in dataset order.
    pub names: Vec<String>,
    pub looks: HashMap<String, SeriesLook>,
}

impl DualView {
    /// Assign looks for a freshly loaded dataset.
    pub fn set_series(&mut self, series: &[SeriesDescriptor]) {
        self.names = series.iter().map(|s| s.name.clone()).collect();
        self.looks = series
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), SeriesLook::for_series(i, s)))
            .collect();
    }

    /// Forward the legend hover to both charts.
    pub fn sync_hover(&mut self) {
        let hover = self.series.hover_series.clone();
        self.curve.set_hover_series(hover.clone());
        self.spectrum.set_hover_series(hover);
    }
}

impl ChartSurface for DualView {
    fn draw_curves(&mut self, frame: &CurveFrame, redraw: Redraw) {
        self.curve.apply(frame, redraw);
    }

    fn draw_spectrum(&mut self, frame: &SpectrumFrame) {
        self.spectrum.apply(frame);
    }
}
