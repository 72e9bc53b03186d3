//! Frequency spectra reconstructed from per-band RPM models.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::SpectrumConfig;
use crate::data::query::QueryState;
use crate::data::resolver::{fallback_rpm, resolve_rpm_for_query};
use crate::data::series::{finite_bounds, SeriesDescriptor, SeriesKey};
use crate::data::spline::SplineModel;
use crate::data::visibility::VisibilityFilter;
use crate::error::{Error, Result};

/// Per-series frequency response: one RPM → dB model per band.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpectrumModel {
    pub centers_hz: Vec<f64>,
    pub band_models_pchip: Vec<SplineModel>,
    #[serde(default)]
    pub rpm_min: Option<f64>,
    #[serde(default)]
    pub rpm_max: Option<f64>,
    /// Anchor RPM (as written in the source data) → per-band 0/1 mask.
    /// A `1` marks a band without a reliable measurement at that anchor.
    #[serde(default)]
    pub anchor_presence: BTreeMap<String, Vec<u8>>,
}

impl SpectrumModel {
    pub fn band_count(&self) -> usize {
        self.centers_hz.len().min(self.band_models_pchip.len())
    }

    /// RPM validity range: explicit bounds when given, else the union of the
    /// band models' knot ranges.
    pub fn rpm_bounds(&self) -> Option<(f64, f64)> {
        if let (Some(lo), Some(hi)) = (self.rpm_min, self.rpm_max) {
            if lo.is_finite() && hi.is_finite() && lo <= hi {
                return Some((lo, hi));
            }
        }
        let derived = finite_bounds(
            self.band_models_pchip
                .iter()
                .filter_map(|m| m.domain())
                .flat_map(|(lo, hi)| [lo, hi]),
        );
        match (derived, self.rpm_max.filter(|v| v.is_finite())) {
            (Some((lo, _)), Some(hi)) if lo <= hi => Some((lo, hi)),
            (d, _) => d,
        }
    }

    /// Structural check: one model per ascending, positive band center.
    /// Individual band models are not checked here; an unusable band
    /// evaluates to `NaN` and is skipped on its own.
    pub fn validate(&self, what: &str) -> Result<()> {
        if self.centers_hz.len() != self.band_models_pchip.len() {
            return Err(Error::invalid_model(
                what,
                format!(
                    "{} band centers but {} band models",
                    self.centers_hz.len(),
                    self.band_models_pchip.len()
                ),
            ));
        }
        if self.centers_hz.iter().any(|f| !f.is_finite() || *f <= 0.0) {
            return Err(Error::invalid_model(what, "band center must be a positive frequency"));
        }
        if self.centers_hz.windows(2).any(|w| w[1] < w[0]) {
            return Err(Error::invalid_model(what, "band centers are not ascending"));
        }
        Ok(())
    }

    /// Problems of the individual band models, as `(band index, error)`.
    pub fn broken_bands(&self, what: &str) -> Vec<(usize, Error)> {
        self.band_models_pchip
            .iter()
            .enumerate()
            .filter_map(|(i, band)| {
                band.validate(&format!("{what} band {i}"))
                    .err()
                    .map(|e| (i, e))
            })
            .collect()
    }

    /// Mask of the anchor closest to `rpm`, if one lies within `tolerance`.
    /// Masks that do not cover every band are ignored.
    pub fn anchor_mask(&self, rpm: f64, tolerance: f64) -> Option<&[u8]> {
        let bands = self.band_count();
        self.anchor_presence
            .iter()
            .filter_map(|(key, mask)| {
                let anchor: f64 = key.trim().parse().ok()?;
                let dist = (anchor - rpm).abs();
                (dist <= tolerance && mask.len() == bands).then_some((dist, mask.as_slice()))
            })
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, mask)| mask)
    }

    /// `[hz, db]` for every band at `rpm`. Negative levels are clamped to 0;
    /// malformed bands, non-finite levels and bands masked at a nearby anchor
    /// are left out.
    pub fn band_levels_at(&self, rpm: f64, anchor_tolerance: f64) -> Vec<[f64; 2]> {
        let mask = self.anchor_mask(rpm, anchor_tolerance);
        let mut out = Vec::with_capacity(self.band_count());
        for (i, (hz, model)) in self
            .centers_hz
            .iter()
            .zip(self.band_models_pchip.iter())
            .enumerate()
        {
            if mask.is_some_and(|m| m[i] == 1) || model.validate("band").is_err() {
                continue;
            }
            let db = model.eval(rpm);
            if !db.is_finite() {
                continue;
            }
            out.push([*hz, db.max(0.0)]);
        }
        out
    }
}

/// Frequency weighting applied before summing band levels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weighting {
    /// Unweighted.
    #[default]
    Z,
    /// IEC 61672 A-weighting.
    A,
}

impl Weighting {
    pub fn label(&self) -> &'static str {
        match self {
            Weighting::Z => "Z",
            Weighting::A => "A",
        }
    }

    /// Level correction in dB at frequency `hz`.
    pub fn offset_db(&self, hz: f64) -> f64 {
        match self {
            Weighting::Z => 0.0,
            Weighting::A => {
                let f2 = hz * hz;
                let ra = (12194.0f64.powi(2) * f2 * f2)
                    / ((f2 + 20.6f64.powi(2))
                        * (f2 + 12194.0f64.powi(2))
                        * ((f2 + 107.7f64.powi(2)) * (f2 + 737.9f64.powi(2))).sqrt());
                20.0 * ra.log10() + 2.0
            }
        }
    }
}

/// Power sum of band levels: `10 * log10(Σ 10^(L/10))`.
///
/// Non-finite levels are skipped. With nothing left the level is undefined,
/// which is `None` and distinct from a genuine 0 dB.
pub fn composite_level(levels: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut any = false;
    for level in levels.into_iter().filter(|l| l.is_finite()) {
        sum += 10f64.powf(level / 10.0);
        any = true;
    }
    if !any || sum <= 0.0 {
        return None;
    }
    Some(10.0 * sum.log10())
}

/// Composite level of a reconstructed spectrum under `weighting`.
pub fn weighted_composite(points: &[[f64; 2]], weighting: Weighting) -> Option<f64> {
    composite_level(points.iter().map(|p| p[1] + weighting.offset_db(p[0])))
}

/// Reconstructed spectrum of one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumSeries {
    pub key: SeriesKey,
    pub name: String,
    /// RPM the bands were evaluated at.
    pub rpm: f64,
    /// `[hz, db]`, every `db >= 0`.
    pub points: Vec<[f64; 2]>,
    pub composite_db: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpectrumFrame {
    pub series: Vec<SpectrumSeries>,
    /// Query-independent y-axis ceiling in dB.
    pub y_max: f64,
}

impl SpectrumFrame {
    pub fn get(&self, name: &str) -> Option<&SpectrumSeries> {
        self.series.iter().find(|s| s.name == name)
    }
}

/// Rebuilds the spectrum view and memoizes its y-axis ceiling.
///
/// The ceiling depends only on which series are visible (and have a model),
/// never on the query, so it is cached under the sorted list of those keys.
#[derive(Debug, Default)]
pub struct SpectrumReconstructor {
    config: SpectrumConfig,
    ceiling: Option<(Vec<SeriesKey>, f64)>,
    ceiling_computations: usize,
}

impl SpectrumReconstructor {
    pub fn new(config: SpectrumConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &SpectrumConfig {
        &self.config
    }

    /// How often the ceiling was actually computed (cache misses).
    pub fn ceiling_computations(&self) -> usize {
        self.ceiling_computations
    }

    /// Forget the cached ceiling, e.g. after the model set changed.
    pub fn invalidate(&mut self) {
        self.ceiling = None;
    }

    pub fn reconstruct(
        &mut self,
        models: &HashMap<SeriesKey, SpectrumModel>,
        series: &[SeriesDescriptor],
        query: &QueryState,
        visibility: &VisibilityFilter,
    ) -> SpectrumFrame {
        let visible: Vec<&SeriesDescriptor> = series
            .iter()
            .filter(|s| visibility.is_visible(&s.name))
            .collect();
        let y_max = self.ceiling(models, &visible);
        let tolerance = self.config.anchor_tolerance_rpm;

        let mut out = Vec::with_capacity(visible.len());
        for s in visible {
            let key = s.key();
            let Some(model) = models.get(&key) else {
                continue;
            };
            let rpm = resolve_rpm_for_query(s, Some(model), query);
            if !(rpm.is_finite() && rpm > 0.0) {
                continue;
            }
            let points = model.band_levels_at(rpm, tolerance);
            let composite_db = weighted_composite(&points, self.config.weighting);
            out.push(SpectrumSeries {
                key,
                name: s.name.clone(),
                rpm,
                points,
                composite_db,
            });
        }
        SpectrumFrame { series: out, y_max }
    }

    /// Ceiling over the visible series, each evaluated at its own maximum RPM.
    pub fn ceiling(
        &mut self,
        models: &HashMap<SeriesKey, SpectrumModel>,
        visible: &[&SeriesDescriptor],
    ) -> f64 {
        let mut keys: Vec<SeriesKey> = visible
            .iter()
            .map(|s| s.key())
            .filter(|k| models.contains_key(k))
            .collect();
        keys.sort();
        keys.dedup();

        if let Some((cached_keys, value)) = &self.ceiling {
            if *cached_keys == keys {
                return *value;
            }
        }

        let tolerance = self.config.anchor_tolerance_rpm;
        let mut y_max = 0.0f64;
        for s in visible {
            let Some(model) = models.get(&s.key()) else {
                continue;
            };
            let Some(rpm) = fallback_rpm(s, Some(model)) else {
                continue;
            };
            for p in model.band_levels_at(rpm, tolerance) {
                y_max = y_max.max(p[1]);
            }
        }
        log::trace!("spectrum ceiling recomputed for {} series: {y_max:.2} dB", keys.len());
        self.ceiling_computations += 1;
        self.ceiling = Some((keys, y_max));
        y_max
    }
}
