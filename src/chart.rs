//! Interface to the charting layer.
//!
//! The sync controller does not draw anything itself. It hands finished
//! frames to a [`ChartSurface`]; the egui panels implement it by keeping the
//! frames for the next paint, tests implement it by recording calls.

use crate::data::spectrum::SpectrumFrame;
use crate::sync::CurveFrame;

/// A visible axis range in data coordinates, always `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisWindow {
    pub min: f64,
    pub max: f64,
}

impl AxisWindow {
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_bounds(bounds: Option<(f64, f64)>) -> Option<Self> {
        bounds.map(|(a, b)| Self::new(a, b)).filter(Self::is_valid)
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn midpoint(&self) -> f64 {
        self.min + 0.5 * self.span()
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.max(self.min).min(self.max)
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn union(&self, other: &AxisWindow) -> AxisWindow {
        AxisWindow {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Mapping between data values and plot coordinates.
///
/// egui_plot only draws linear axes, so logarithmic axes are drawn on
/// `log10(value)` and mapped back for labels and pointer readouts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum AxisScale {
    #[default]
    Linear,
    Log10,
}

impl AxisScale {
    pub fn to_plot(&self, v: f64) -> f64 {
        match self {
            AxisScale::Linear => v,
            AxisScale::Log10 => {
                if v > 0.0 {
                    v.log10()
                } else {
                    f64::NAN
                }
            }
        }
    }

    pub fn from_plot(&self, p: f64) -> f64 {
        match self {
            AxisScale::Linear => p,
            AxisScale::Log10 => 10f64.powf(p),
        }
    }
}

/// How much of a chart has to be redone for a frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Redraw {
    /// Same axes, new series data.
    Incremental,
    /// Axis semantics changed: drop the old axes and series and start over.
    Rebuild,
}

/// The charting layer as seen from the sync controller.
pub trait ChartSurface {
    fn draw_curves(&mut self, frame: &CurveFrame, redraw: Redraw);
    fn draw_spectrum(&mut self, frame: &SpectrumFrame);
}
