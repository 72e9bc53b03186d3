//! Configuration for the fan performance viewer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::sampler::sample_count_for_width;
use crate::data::series::Domain;
use crate::data::spectrum::Weighting;
use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Curve sampling
// ─────────────────────────────────────────────────────────────────────────────

/// How densely curve models are resampled for drawing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// One sample per this many pixels of plot width. Default: `20.0`.
    pub px_per_sample: f32,
    /// Lower bound on the sample count. Default: `20`.
    pub min_samples: usize,
    /// Upper bound on the sample count. Default: `50`.
    pub max_samples: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            px_per_sample: 20.0,
            min_samples: 20,
            max_samples: 50,
        }
    }
}

impl SamplingConfig {
    pub fn count_for_width(&self, width_px: f32) -> usize {
        sample_count_for_width(width_px, self.px_per_sample, self.min_samples, self.max_samples)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Spectrum
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumConfig {
    /// Weighting used for the composite level readout. Default: `Z`.
    pub weighting: Weighting,
    /// Distance in RPM within which a measured anchor's band mask applies.
    /// Default: `1.0`.
    pub anchor_tolerance_rpm: f64,
    /// Draw the frequency axis logarithmically. Default: `true`.
    pub log_frequency_axis: bool,
    /// The y-axis ceiling is rounded up to a multiple of this. Default: `5.0`.
    pub ceiling_step_db: f64,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            weighting: Weighting::Z,
            anchor_tolerance_rpm: 1.0,
            log_frequency_axis: true,
            ceiling_step_db: 5.0,
        }
    }
}

impl SpectrumConfig {
    /// Axis ceiling shown for a raw `y_max`: next step multiple, at least one step.
    pub fn display_ceiling(&self, y_max: f64) -> f64 {
        let step = if self.ceiling_step_db > 0.0 {
            self.ceiling_step_db
        } else {
            1.0
        };
        if !y_max.is_finite() || y_max <= 0.0 {
            return step;
        }
        ((y_max / step).ceil() * step).max(step)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FanPlotConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field            | Purpose |
/// |------------------|---------|
/// | `title`          | Native window title |
/// | `initial_domain` | Domain the curve chart opens in |
/// | `sampling`       | Curve resampling density |
/// | `spectrum`       | Spectrum reconstruction and display |
/// | `dataset`        | Dataset file loaded at start-up |
/// | `native_options` | eframe window options (not serialized) |
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FanPlotConfig {
    pub title: String,
    pub initial_domain: Domain,
    pub sampling: SamplingConfig,
    pub spectrum: SpectrumConfig,
    pub dataset: Option<PathBuf>,
    #[serde(skip)]
    pub native_options: Option<eframe::NativeOptions>,
}

impl Default for FanPlotConfig {
    fn default() -> Self {
        Self {
            title: "FanPlot".to_string(),
            initial_domain: Domain::Rpm,
            sampling: SamplingConfig::default(),
            spectrum: SpectrumConfig::default(),
            dataset: None,
            native_options: None,
        }
    }
}

impl FanPlotConfig {
    /// Read a configuration file; `.yaml`/`.yml` and `.json` are accepted.
    /// Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let cfg: FanPlotConfig = match ext.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
            Some("json") => serde_json::from_str(&text)?,
            _ => return Err(Error::UnsupportedFormat(path.to_path_buf())),
        };
        log::debug!("configuration loaded from {}", path.display());
        Ok(cfg)
    }
}
