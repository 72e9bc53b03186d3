//! Resampling of curve models into renderable polylines.

use crate::chart::AxisWindow;
use crate::data::series::{Domain, SeriesDescriptor};
use crate::data::spline::SplineModel;

/// Resample `model` with `count` evenly spaced points over the part of
/// `[x_min, x_max]` the model is valid on.
///
/// Returns an empty vector for an absent model, an inverted request or a
/// window that does not overlap the model's knots.
pub fn sample(model: Option<&SplineModel>, x_min: f64, x_max: f64, count: usize) -> Vec<[f64; 2]> {
    let Some(model) = model else {
        return Vec::new();
    };
    let Some(domain) = model.domain() else {
        return Vec::new();
    };
    sample_fn(domain, x_min, x_max, count, |x| model.eval(x))
}

/// Model value at `x` for a readout. Same clamping as evaluation; `None`
/// stands for "no data".
pub fn value_at(model: Option<&SplineModel>, x: f64) -> Option<f64> {
    model.map(|m| m.eval(x)).filter(|v| v.is_finite())
}

/// Number of samples for a plot `width_px` wide.
pub fn sample_count_for_width(width_px: f32, px_per_sample: f32, min: usize, max: usize) -> usize {
    let raw = if width_px.is_finite() && px_per_sample > 0.0 {
        (width_px / px_per_sample).round().max(0.0) as usize
    } else {
        min
    };
    raw.clamp(min, max.max(min))
}

fn sample_fn(
    domain: (f64, f64),
    x_min: f64,
    x_max: f64,
    count: usize,
    f: impl Fn(f64) -> f64,
) -> Vec<[f64; 2]> {
    if count == 0 || !(x_min <= x_max) {
        return Vec::new();
    }
    let lo = x_min.max(domain.0.min(domain.1));
    let hi = x_max.min(domain.0.max(domain.1));
    if !(lo <= hi) || !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    if count == 1 || lo == hi {
        let y = f(lo);
        return if y.is_finite() { vec![[lo, y]] } else { Vec::new() };
    }

    let last = (count - 1) as f64;
    (0..count)
        .filter_map(|i| {
            let x = if i + 1 == count {
                hi
            } else {
                (lo + (i as f64 / last) * (hi - lo)).min(hi)
            };
            let y = f(x);
            y.is_finite().then_some([x, y])
        })
        .collect()
}

/// Where the airflow curve of a series comes from in a given domain.
#[derive(Debug, Clone)]
pub enum CurveSource<'a> {
    /// A fitted airflow model indexed by the domain itself.
    Forward(&'a SplineModel),
    /// `outer(inner(x))`: noise → RPM → airflow.
    Composed {
        inner: &'a SplineModel,
        outer: &'a SplineModel,
    },
    /// Measured points, sorted by coordinate.
    Raw(Vec<[f64; 2]>),
    Empty,
}

impl<'a> CurveSource<'a> {
    pub fn for_series(series: &'a SeriesDescriptor, domain: Domain) -> Self {
        let models = &series.models;
        let usable = |m: &'a Option<SplineModel>| m.as_ref().filter(|m| m.is_usable());
        let forward = match domain {
            Domain::Rpm => usable(&models.rpm_to_airflow),
            Domain::NoiseDb => usable(&models.noise_to_airflow),
        };
        if let Some(m) = forward {
            return CurveSource::Forward(m);
        }
        if domain == Domain::NoiseDb {
            if let (Some(inner), Some(outer)) = (
                usable(&models.noise_to_rpm),
                usable(&models.rpm_to_airflow),
            ) {
                return CurveSource::Composed { inner, outer };
            }
        }
        let raw = series.raw_curve(domain);
        if raw.is_empty() {
            CurveSource::Empty
        } else {
            CurveSource::Raw(raw)
        }
    }

    /// Range of the domain coordinate this source has data for.
    pub fn domain(&self) -> Option<(f64, f64)> {
        match self {
            CurveSource::Forward(m) => m.domain(),
            CurveSource::Composed { inner, .. } => inner.domain(),
            CurveSource::Raw(pts) => match (pts.first(), pts.last()) {
                (Some(a), Some(b)) => Some((a[0], b[0])),
                _ => None,
            },
            CurveSource::Empty => None,
        }
    }

    /// Polyline over `window`. Raw sources return their points inside the
    /// window unchanged, spline sources are resampled with `count` points.
    pub fn sample(&self, window: AxisWindow, count: usize) -> Vec<[f64; 2]> {
        match self {
            CurveSource::Forward(m) => sample(Some(m), window.min, window.max, count),
            CurveSource::Composed { inner, outer } => match inner.domain() {
                Some(domain) => sample_fn(domain, window.min, window.max, count, |x| {
                    outer.eval(inner.eval(x))
                }),
                None => Vec::new(),
            },
            CurveSource::Raw(pts) => pts
                .iter()
                .copied()
                .filter(|p| window.contains(p[0]))
                .collect(),
            CurveSource::Empty => Vec::new(),
        }
    }

    /// Airflow at `x`, clamped into the source's domain.
    pub fn value_at(&self, x: f64) -> Option<f64> {
        match self {
            CurveSource::Forward(m) => value_at(Some(m), x),
            CurveSource::Composed { inner, outer } => {
                value_at(Some(outer), inner.eval(x)).filter(|_| x.is_finite())
            }
            CurveSource::Raw(pts) => interpolate_linear(pts, x),
            CurveSource::Empty => None,
        }
    }
}

/// Piecewise-linear lookup over sorted points, clamped at both ends.
fn interpolate_linear(pts: &[[f64; 2]], x: f64) -> Option<f64> {
    let (first, last) = (pts.first()?, pts.last()?);
    if !x.is_finite() {
        return None;
    }
    if x <= first[0] {
        return Some(first[1]);
    }
    if x >= last[0] {
        return Some(last[1]);
    }
    let i = pts.partition_point(|p| p[0] <= x).saturating_sub(1);
    let (a, b) = (pts[i], pts[(i + 1).min(pts.len() - 1)]);
    let dx = b[0] - a[0];
    if dx == 0.0 {
        return Some(a[1]);
    }
    Some(a[1] + (x - a[0]) / dx * (b[1] - a[1]))
}
