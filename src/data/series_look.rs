//! SeriesLook: visual styling shared by a series' curve and spectrum.

use eframe::egui;
use egui_plot::{LineStyle, MarkerShape};

use crate::data::series::SeriesDescriptor;

#[derive(Debug, Clone)]
pub struct SeriesLook {
    pub color: egui::Color32,
    pub width: f32,
    pub style: LineStyle,
    /// Draw the raw measured points as markers on the curve chart.
    pub show_points: bool,
    pub point_size: f32,
    pub marker: MarkerShape,
}

impl Default for SeriesLook {
    fn default() -> Self {
        Self {
            color: egui::Color32::GRAY,
            width: 2.0,
            style: LineStyle::Solid,
            show_points: true,
            point_size: 3.0,
            marker: MarkerShape::Circle,
        }
    }
}

impl SeriesLook {
    /// Look for the `index`-th series; an explicit descriptor color wins
    /// over the palette.
    pub fn for_series(index: usize, series: &SeriesDescriptor) -> Self {
        let color = match series.color {
            Some([r, g, b]) => egui::Color32::from_rgb(r, g, b),
            None => Self::alloc_color(index),
        };
        Self {
            color,
            ..Default::default()
        }
    }

    /// Allocate a distinct color for the given series index.
    pub fn alloc_color(index: usize) -> egui::Color32 {
        const PALETTE: [egui::Color32; 10] = [
            egui::Color32::from_rgb(31, 119, 180),
            egui::Color32::from_rgb(255, 127, 14),
            egui::Color32::from_rgb(44, 160, 44),
            egui::Color32::from_rgb(214, 39, 40),
            egui::Color32::from_rgb(148, 103, 189),
            egui::Color32::from_rgb(140, 86, 75),
            egui::Color32::from_rgb(227, 119, 194),
            egui::Color32::from_rgb(127, 127, 127),
            egui::Color32::from_rgb(188, 189, 34),
            egui::Color32::from_rgb(23, 190, 207),
        ];
        PALETTE[index % PALETTE.len()]
    }

    /// Faded variant for series that are not under the pointer.
    pub fn dimmed(&self) -> egui::Color32 {
        let c = self.color;
        egui::Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), 40)
    }
}
